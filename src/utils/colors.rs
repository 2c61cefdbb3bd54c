//! ANSI colors for terminal output.

use crate::models::status::Status;

pub const RESET: &str = "\x1b[0m";
pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

pub fn color_for_status(status: Status) -> &'static str {
    match status {
        Status::Working => GREEN,
        Status::Breaking => YELLOW,
        Status::Off => BLUE,
    }
}

/// Weekend rows of the month view are tinted.
pub fn color_for_weekday(label: &str) -> &'static str {
    match label {
        "Sat" => BLUE,
        "Sun" => RED,
        _ => RESET,
    }
}
