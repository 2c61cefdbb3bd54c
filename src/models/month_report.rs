use super::work_session::{DailyReport, DailyReportExt};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// One calendar row of the month view.
#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    pub date: NaiveDate,
    pub sessions: DailyReport,
}

/// All days of a month, in order, empty days included.
#[derive(Debug, Clone, Serialize)]
pub struct MonthReport {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayReport>,
}

impl MonthReport {
    pub fn total_working_time(&self) -> Duration {
        self.days
            .iter()
            .fold(Duration::zero(), |acc, d| acc + d.sessions.total_working_time())
    }

    pub fn worked_days(&self) -> usize {
        self.days.iter().filter(|d| !d.sessions.is_empty()).count()
    }
}
