//! Formatting utilities used for CLI outputs.

use chrono::Duration;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Render a duration as `02h 25m` (or `02:25` when `short`).
pub fn duration2readable(d: Duration, short: bool) -> String {
    let mins = d.num_minutes().max(0);
    let hours = mins / 60;
    let minutes = mins % 60;

    if short {
        format!("{:02}:{:02}", hours, minutes)
    } else {
        format!("{:02}h {:02}m", hours, minutes)
    }
}
