//! Manual corrections of a day's report.
//!
//! Sessions and breaks are addressed by their 1-based position as shown by
//! `list`. The whole change is applied under the store lock and rejected
//! without writing anything if it would leave an interval ending before it
//! starts. While the monitor is recording, the open last session can be
//! moved but not closed or deleted.

use crate::core::clock::ShiftedClock;
use crate::core::reporter::Reporter;
use crate::db::repository::ReportRepository;
use crate::errors::{AppError, AppResult};
use crate::models::status::Status;
use crate::models::work_session::DailyReport;
use chrono::{DateTime, Local, NaiveDate, NaiveTime};

#[derive(Debug, Clone, Default)]
pub struct EditRequest {
    pub session: usize,
    pub brk: Option<usize>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub delete: bool,
}

pub struct EditLogic;

impl EditLogic {
    pub fn edit<R: ReportRepository>(
        reporter: &Reporter<R>,
        day: NaiveDate,
        req: &EditRequest,
    ) -> AppResult<DailyReport> {
        let clock = *reporter.clock();
        reporter.update_daily_report(day, |report, status| {
            Self::apply(report, status, &clock, day, req)
        })
    }

    pub fn apply(
        report: &mut DailyReport,
        status: Status,
        clock: &ShiftedClock,
        day: NaiveDate,
        req: &EditRequest,
    ) -> AppResult<()> {
        let start = req.start.map(|t| clock.instant_on(day, t)).transpose()?;
        let end = req.end.map(|t| clock.instant_on(day, t)).transpose()?;

        if req.session == 0 || req.session > report.len() {
            return Err(AppError::InvalidSession(req.session));
        }
        let s_idx = req.session - 1;

        let recording =
            !status.is_off() && req.session == report.len() && report[s_idx].is_open();
        if recording && req.brk.is_none() && (req.delete || end.is_some()) {
            return Err(AppError::SessionInProgress(req.session));
        }

        match req.brk {
            None if req.delete => {
                report.remove(s_idx);
            }
            None => {
                let session = &mut report[s_idx];
                if let Some(t) = start {
                    session.start_at = t;
                }
                if let Some(t) = end {
                    session.end_at = Some(t);
                }
                check_interval(&session.start_at, session.end_at.as_ref())?;
            }
            Some(b) => {
                let breaks = &mut report[s_idx].breaks;
                if b == 0 || b > breaks.len() {
                    return Err(AppError::InvalidBreak(b));
                }
                if req.delete {
                    breaks.remove(b - 1);
                } else {
                    let brk = &mut breaks[b - 1];
                    if let Some(t) = start {
                        brk.start_at = t;
                    }
                    if let Some(t) = end {
                        brk.end_at = Some(t);
                    }
                    check_interval(&brk.start_at, brk.end_at.as_ref())?;
                }
            }
        }

        Ok(())
    }
}

fn check_interval(start: &DateTime<Local>, end: Option<&DateTime<Local>>) -> AppResult<()> {
    match end {
        Some(end) if end < start => Err(AppError::InvalidTime(format!(
            "{} ends before it starts ({})",
            end.format("%H:%M"),
            start.format("%H:%M")
        ))),
        _ => Ok(()),
    }
}
