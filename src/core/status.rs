use crate::core::reporter::Reporter;
use crate::db::repository::ReportRepository;
use crate::errors::AppResult;
use crate::models::status::Status;
use crate::models::work_session::{DailyReport, DailyReportExt};
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::duration2readable;
use chrono::{DateTime, Local, NaiveDate};

/// What `status` shows about the current work day.
#[derive(Debug)]
pub struct StatusSummary {
    pub status: Status,
    pub last_activity_at: Option<DateTime<Local>>,
    pub work_day: NaiveDate,
    pub work_day_ends_at: DateTime<Local>,
    pub today: DailyReport,
}

pub struct StatusLogic;

impl StatusLogic {
    pub fn summary<R: ReportRepository>(
        reporter: &Reporter<R>,
        now: DateTime<Local>,
    ) -> AppResult<StatusSummary> {
        let clock = reporter.clock();
        let snapshot = reporter.snapshot()?;
        let work_day = clock.work_day_of(&now)?;

        Ok(StatusSummary {
            status: snapshot.status,
            last_activity_at: snapshot.last_activity_at,
            work_day,
            work_day_ends_at: clock.shifted_midnight(&now)?,
            today: reporter.daily_report(work_day)?,
        })
    }

    pub fn print(s: &StatusSummary) {
        let color = color_for_status(s.status);
        let last = s
            .last_activity_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!("Status        : {color}{}{RESET}", s.status);
        println!("Last activity : {last}");
        println!(
            "Work day      : {} (ends {})",
            s.work_day,
            s.work_day_ends_at.format("%Y-%m-%d %H:%M")
        );
        println!(
            "Today         : {} session(s), worked {}, breaks {}",
            s.today.len(),
            duration2readable(s.today.total_working_time(), false),
            duration2readable(s.today.total_break_time(), false)
        );
        if let Some(open) = s.today.last().filter(|w| w.is_open()) {
            println!("Open since    : {}", open.start_at.format("%H:%M"));
        }
    }
}
