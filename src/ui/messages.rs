//! Terminal messages for CLI commands. The monitor loop reports through
//! `tracing` instead.

use crate::utils::colors::{BLUE, GREEN, RED, RESET, YELLOW};
use crate::utils::formatting::bold;
use std::fmt;

#[derive(Clone, Copy)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Level::Info => (BLUE, "ℹ️"),
            Level::Success => (GREEN, "✅"),
            Level::Warning => (YELLOW, "⚠️"),
            Level::Error => (RED, "❌"),
        }
    }
}

fn line<T: fmt::Display>(level: Level, msg: T) -> String {
    let (color, icon) = level.style();
    format!("{color}{}{RESET} {msg}", bold(icon))
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(Level::Info, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(Level::Success, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", line(Level::Warning, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(Level::Error, msg));
}

/// Section title, e.g. the month shown by `list`.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{BLUE}{}{RESET}\n", bold(&format!("── {msg} ──")));
}
