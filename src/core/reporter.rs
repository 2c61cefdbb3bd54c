//! Work-session state machine.
//!
//! `handle_activity` reacts to a user activity signal, `poll` to the periodic
//! timer. Both run the whole read → decide → mutate → persist sequence while
//! holding the in-process mutex *and* the cross-process store lock, so no
//! other caller (thread or process) can observe a half-applied transition.
//!
//! Thresholds are measured from the last activity, not from the polling
//! instant, and session/break boundaries are anchored to that last activity.
//!
//! A transition writes the day's report first and the status second. The
//! store lock is what makes the pair atomic; a crash between the two writes
//! leaves a report that the next transition reconciles (see the no-op cases
//! of `start_breaking`, `finish_breaking` and `finish_working`).

use crate::config::{Config, Settings};
use crate::core::clock::ShiftedClock;
use crate::db::lock::{FileMutex, FileMutexGuard};
use crate::db::repository::{ReportRepository, SqliteReportRepository};
use crate::errors::{AppError, AppResult};
use crate::models::status::Status;
use crate::models::work_session::{DailyReport, DailyReportExt};
use crate::ui::notifier::{self, Notifier};
use crate::utils::path::lock_file_for;
use chrono::{DateTime, Duration, Local, NaiveDate};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

const WORK_STARTED: (&str, &str) = ("Work started", "Let's get going");
const BREAK_STARTED: (&str, &str) = ("Break started", "Take it easy");
const BREAK_ENDED: (&str, &str) = ("Break ended", "Welcome back");
const WORK_ENDED: (&str, &str) = ("Work ended", "Good job today");

/// Status and last activity as seen by a viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub status: Status,
    pub last_activity_at: Option<DateTime<Local>>,
}

pub struct Reporter<R: ReportRepository> {
    repo: Mutex<R>,
    store_lock: FileMutex,
    notifier: Box<dyn Notifier>,
    clock: ShiftedClock,
    start_break_interval: Duration,
    finish_working_interval: Duration,
}

impl Reporter<SqliteReportRepository> {
    /// Reporter over the configured database, its lock file and notifier.
    pub fn open(cfg: &Config, settings: &Settings) -> AppResult<Self> {
        let db_path = cfg.database_path();
        let store_lock = FileMutex::new(lock_file_for(&db_path))?;
        let repo = {
            let _guard = store_lock.lock()?;
            SqliteReportRepository::open(&db_path)?
        };
        Ok(Self::new(
            repo,
            store_lock,
            notifier::from_config(settings.notifications),
            settings,
        ))
    }
}

impl<R: ReportRepository> Reporter<R> {
    pub fn new(
        repo: R,
        store_lock: FileMutex,
        notifier: Box<dyn Notifier>,
        settings: &Settings,
    ) -> Self {
        Self {
            repo: Mutex::new(repo),
            store_lock,
            notifier,
            clock: ShiftedClock::new(settings.shift_duration),
            start_break_interval: settings.start_break_interval,
            finish_working_interval: settings.finish_working_interval,
        }
    }

    pub fn clock(&self) -> &ShiftedClock {
        &self.clock
    }

    /// Take the in-process mutex, then the cross-process lock.
    /// Both are released when the returned guards drop.
    fn exclusive(&self) -> AppResult<(MutexGuard<'_, R>, FileMutexGuard<'_>)> {
        let repo = self
            .repo
            .lock()
            .map_err(|_| AppError::Other("report store mutex poisoned".into()))?;
        let lock = self.store_lock.lock()?;
        Ok((repo, lock))
    }

    pub fn handle_activity(&self) -> AppResult<()> {
        self.handle_activity_at(Local::now())
    }

    pub fn handle_activity_at(&self, now: DateTime<Local>) -> AppResult<()> {
        let (repo, _lock) = self.exclusive()?;
        let repo = &*repo;

        debug!(at = %now, "handle activity");

        repo.set_last_activity_at(now)?;

        match repo.get_status()? {
            Status::Off => self.start_new_working(repo, now),
            Status::Breaking => self.finish_breaking(repo, now),
            Status::Working => Ok(()),
        }
    }

    pub fn poll(&self) -> AppResult<()> {
        self.poll_at(Local::now())
    }

    pub fn poll_at(&self, now: DateTime<Local>) -> AppResult<()> {
        let (repo, _lock) = self.exclusive()?;
        let repo = &*repo;

        let status = repo.get_status()?;
        debug!(status = %status, "poll");

        if status.is_off() {
            return Ok(());
        }

        let last = repo.get_last_activity_at()?.ok_or_else(|| {
            AppError::Consistency(format!(
                "status is {status} but no activity was ever recorded"
            ))
        })?;

        if self.clock.is_overnight(&now, &last)? {
            info!(last_activity = %last, "work day rolled over");
            return self.finish_working(repo, last);
        }

        match status {
            Status::Working if elapsed(last, self.start_break_interval, now) => {
                self.start_breaking(repo, last)
            }
            Status::Breaking if elapsed(last, self.finish_working_interval, now) => {
                self.finish_working(repo, last)
            }
            _ => Ok(()),
        }
    }

    /// Replace a whole day's report (manual corrections).
    pub fn save_daily_report(&self, day: NaiveDate, sessions: &DailyReport) -> AppResult<()> {
        self.update_daily_report(day, |report, _| {
            *report = sessions.clone();
            Ok(())
        })
        .map(|_| ())
    }

    /// Read, change and write back one day's report without releasing the lock.
    /// `change` also sees the current status. Nothing is written when it fails.
    pub fn update_daily_report<F>(&self, day: NaiveDate, change: F) -> AppResult<DailyReport>
    where
        F: FnOnce(&mut DailyReport, Status) -> AppResult<()>,
    {
        let (repo, _lock) = self.exclusive()?;
        let status = repo.get_status()?;
        let mut report = repo.get_daily_report(day)?;
        change(&mut report, status)?;
        repo.set_daily_report(day, &report)?;

        info!(day = %day, sessions = report.len(), "report saved");
        self.record(
            &*repo,
            "edit",
            &day.to_string(),
            &format!("{} session(s) saved", report.len()),
        );
        Ok(report)
    }

    pub fn daily_report(&self, day: NaiveDate) -> AppResult<DailyReport> {
        let (repo, _lock) = self.exclusive()?;
        repo.get_daily_report(day)
    }

    /// Reports for several days under a single lock acquisition.
    pub fn daily_reports(&self, days: &[NaiveDate]) -> AppResult<Vec<(NaiveDate, DailyReport)>> {
        let (repo, _lock) = self.exclusive()?;
        days.iter()
            .map(|d| repo.get_daily_report(*d).map(|r| (*d, r)))
            .collect()
    }

    /// Run `f` against the store under the lock.
    pub fn with_repo<T>(&self, f: impl FnOnce(&R) -> AppResult<T>) -> AppResult<T> {
        let (repo, _lock) = self.exclusive()?;
        f(&*repo)
    }

    pub fn snapshot(&self) -> AppResult<Snapshot> {
        let (repo, _lock) = self.exclusive()?;
        Ok(Snapshot {
            status: repo.get_status()?,
            last_activity_at: repo.get_last_activity_at()?,
        })
    }

    fn start_new_working(&self, repo: &R, at: DateTime<Local>) -> AppResult<()> {
        let day = self.clock.work_day_of(&at)?;
        let mut report = repo.get_daily_report(day)?;
        report.open_session(at);
        repo.set_daily_report(day, &report)?;
        repo.set_status(Status::Working)?;

        info!(day = %day, at = %at, "work started");
        self.record(repo, "work_start", &day.to_string(), &at.to_rfc3339());
        self.notify(WORK_STARTED);
        Ok(())
    }

    fn start_breaking(&self, repo: &R, at: DateTime<Local>) -> AppResult<()> {
        let day = self.clock.work_day_of(&at)?;
        let mut report = repo.get_daily_report(day)?;
        if !report.start_break_on_last_session(at) {
            warn!(day = %day, "no open session to start a break on");
            return Ok(());
        }
        repo.set_daily_report(day, &report)?;
        repo.set_status(Status::Breaking)?;

        info!(day = %day, at = %at, "break started");
        self.record(repo, "break_start", &day.to_string(), &at.to_rfc3339());
        self.notify(BREAK_STARTED);
        Ok(())
    }

    fn finish_breaking(&self, repo: &R, at: DateTime<Local>) -> AppResult<()> {
        let day = self.clock.work_day_of(&at)?;
        let mut report = repo.get_daily_report(day)?;
        if report.close_open_break(at) {
            repo.set_daily_report(day, &report)?;
        } else {
            warn!(day = %day, "no open break to close");
        }
        repo.set_status(Status::Working)?;

        info!(day = %day, at = %at, "break ended");
        self.record(repo, "break_end", &day.to_string(), &at.to_rfc3339());
        self.notify(BREAK_ENDED);
        Ok(())
    }

    /// Close the day's last session at `end_at`; a break still open is dropped.
    fn finish_working(&self, repo: &R, end_at: DateTime<Local>) -> AppResult<()> {
        let day = self.clock.work_day_of(&end_at)?;
        let mut report = repo.get_daily_report(day)?;
        if report.close_last_session(end_at) {
            repo.set_daily_report(day, &report)?;
        } else {
            warn!(day = %day, "no open session to close");
        }
        repo.set_status(Status::Off)?;

        info!(day = %day, at = %end_at, "work ended");
        self.record(repo, "work_end", &day.to_string(), &end_at.to_rfc3339());
        self.notify(WORK_ENDED);
        Ok(())
    }

    fn notify(&self, (title, message): (&str, &str)) {
        if let Err(e) = self.notifier.notify(title, message) {
            warn!(error = %e, title, "notification failed");
        }
    }

    fn record(&self, repo: &R, operation: &str, target: &str, message: &str) {
        if let Err(e) = repo.record(operation, target, message) {
            warn!(error = %e, operation, "failed to write internal log");
        }
    }
}

/// True once more than `interval` has passed since `last`.
/// A deadline beyond the representable range is never reached.
fn elapsed(last: DateTime<Local>, interval: Duration, now: DateTime<Local>) -> bool {
    last.checked_add_signed(interval)
        .is_some_and(|deadline| now > deadline)
}
