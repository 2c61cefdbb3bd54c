use crate::core::reporter::Reporter;
use crate::db::repository::ReportRepository;
use crate::errors::AppResult;
use crate::models::month_report::{DayReport, MonthReport};
use crate::models::work_session::{DailyReport, DailyReportExt};
use crate::ui::messages;
use crate::utils::colors::{GREY, RESET, color_for_weekday};
use crate::utils::date::{all_days_of_month, weekday_short};
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table};
use crate::utils::{duration2readable, time::hhmm};
use chrono::{DateTime, Local};

pub struct ListLogic;

impl ListLogic {
    /// Every day of the month, empty days included.
    pub fn month_report<R: ReportRepository>(
        reporter: &Reporter<R>,
        year: i32,
        month: u32,
    ) -> AppResult<MonthReport> {
        let days = all_days_of_month(year, month);
        let days = reporter
            .daily_reports(&days)?
            .into_iter()
            .map(|(date, sessions)| DayReport { date, sessions })
            .collect();

        Ok(MonthReport { year, month, days })
    }

    pub fn print(report: &MonthReport, json: bool) -> AppResult<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(report)?);
            return Ok(());
        }

        messages::header(format!("{:04}-{:02}", report.year, report.month));
        print!("{}", Self::render(report));
        println!(
            "\nWorked days: {}   Total: {}",
            report.worked_days(),
            bold(&duration2readable(report.total_working_time(), false))
        );
        Ok(())
    }

    /// Month table, one row per day; weekends and empty days are tinted.
    pub fn render(report: &MonthReport) -> String {
        let mut table = Table::new(vec![
            Column::new("Date", 10),
            Column::new("Day", 3),
            Column::new("Sessions", 30),
            Column::new("Breaks", 30),
            Column::new("Work", 5),
            Column::new("Break", 5),
        ]);

        for day in &report.days {
            table.add_row(vec![
                day.date.to_string(),
                weekday_short(&day.date).to_string(),
                sessions_cell(&day.sessions),
                breaks_cell(&day.sessions),
                duration2readable(day.sessions.total_working_time(), true),
                duration2readable(day.sessions.total_break_time(), true),
            ]);
        }

        let rendered = table.render();
        let mut lines = rendered.lines();
        let mut out = String::new();

        if let Some(header) = lines.next() {
            out.push_str(&bold(header.trim_end()));
            out.push('\n');
        }

        for (day, line) in report.days.iter().zip(lines) {
            let color = if day.sessions.is_empty() {
                GREY
            } else {
                color_for_weekday(weekday_short(&day.date))
            };
            out.push_str(&format!("{color}{}{RESET}\n", line.trim_end()));
        }

        out
    }
}

fn span(start: &DateTime<Local>, end: Option<&DateTime<Local>>) -> String {
    format!("{} ~ {}", hhmm(Some(start)), hhmm(end))
}

/// `1) 09:00 ~ 12:00  2) 13:00 ~ --:--`
fn sessions_cell(sessions: &DailyReport) -> String {
    sessions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}) {}", i + 1, span(&s.start_at, s.end_at.as_ref())))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Breaks prefixed by their session number: `1: 10:00 ~ 10:20, 11:00 ~ 11:05`
fn breaks_cell(sessions: &DailyReport) -> String {
    sessions
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.breaks.is_empty())
        .map(|(i, s)| {
            let breaks = s
                .breaks
                .iter()
                .map(|b| span(&b.start_at, b.end_at.as_ref()))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {}", i + 1, breaks)
        })
        .collect::<Vec<_>>()
        .join("  ")
}
