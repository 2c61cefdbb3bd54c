use crate::db::log::LogEntry;
use crate::errors::{AppError, AppResult};
use ansi_term::Colour;
use regex::Regex;

const OP_WIDTH_MAX: usize = 60;

fn strip_ansi(s: &str) -> AppResult<String> {
    let re = Regex::new(r"\x1B\[[0-9;]*[mK]").map_err(|e| AppError::Other(e.to_string()))?;
    Ok(re.replace_all(s, "").into_owned())
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "work_start" => Colour::Green,
        "work_end" => Colour::Red,
        "break_start" => Colour::Yellow,
        "break_end" => Colour::Cyan,
        "edit" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `op (target)` with the operation painted, cut to `OP_WIDTH_MAX` visible chars.
fn op_target_cell(entry: &LogEntry) -> String {
    let color = color_for_operation(&entry.operation);
    let plain = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let visible = if plain.chars().count() > OP_WIDTH_MAX {
        let mut s: String = plain.chars().take(OP_WIDTH_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn render(entries: &[LogEntry]) -> AppResult<Vec<String>> {
        let cells = entries.iter().map(op_target_cell).collect::<Vec<_>>();
        let dates = entries
            .iter()
            .map(|e| {
                chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| e.date.clone())
            })
            .collect::<Vec<_>>();

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = dates.iter().map(String::len).max().unwrap_or(10);

        let mut widths = Vec::with_capacity(cells.len());
        for c in &cells {
            widths.push(strip_ansi(c)?.chars().count());
        }
        let op_w = widths.iter().copied().max().unwrap_or(10).min(OP_WIDTH_MAX);

        let lines = entries
            .iter()
            .zip(dates.iter().zip(cells.iter().zip(widths)))
            .map(|(e, (date, (cell, visible)))| {
                let padding = " ".repeat(op_w.saturating_sub(visible));
                format!(
                    "{:>id_w$}: {:<date_w$} | {}{} => {}",
                    e.id,
                    date,
                    cell,
                    padding,
                    e.message,
                    id_w = id_w,
                    date_w = date_w
                )
            })
            .collect();

        Ok(lines)
    }

    pub fn print_log(entries: &[LogEntry]) -> AppResult<()> {
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");
        for line in Self::render(entries)? {
            println!("{line}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, operation: &str, target: &str) -> LogEntry {
        LogEntry {
            id,
            date: "2024-03-01T09:00:00+01:00".into(),
            operation: operation.into(),
            target: target.into(),
            message: "m".into(),
        }
    }

    #[test]
    fn long_targets_are_truncated() {
        let long = "x".repeat(100);
        let cell = op_target_cell(&entry(1, "edit", &long));
        let visible = strip_ansi(&cell).unwrap();
        assert_eq!(visible.chars().count(), OP_WIDTH_MAX);
        assert!(visible.ends_with("..."));
    }

    #[test]
    fn rows_are_aligned() {
        let lines =
            LogLogic::render(&[entry(1, "init", ""), entry(12, "work_start", "2024-03-01")])
                .unwrap();
        let plain: Vec<String> = lines.iter().map(|l| strip_ansi(l).unwrap()).collect();
        assert_eq!(plain[0].find("=>"), plain[1].find("=>"));
        assert!(plain[0].starts_with(" 1: "));
    }
}
