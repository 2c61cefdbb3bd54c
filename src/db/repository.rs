//! Report store: current status, last activity instant and one report per work day.

use crate::db::initialize::init_db;
use crate::db::log::{LogEntry, load_log, ttlog};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::status::Status;
use crate::models::work_session::DailyReport;
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{OptionalExtension, params};
use std::path::Path;

pub const CURRENT_STATE_KEY: &str = "current_state";
pub const LAST_EVENT_AT_KEY: &str = "last_event_at";

/// Storage contract consumed by the state machine.
///
/// Reports are always read and written whole: sessions and breaks are
/// addressed by position, so there is no partial update.
pub trait ReportRepository {
    /// Defaults to `Off` when never set.
    fn get_status(&self) -> AppResult<Status>;
    fn set_status(&self, status: Status) -> AppResult<()>;

    fn get_last_activity_at(&self) -> AppResult<Option<DateTime<Local>>>;
    fn set_last_activity_at(&self, at: DateTime<Local>) -> AppResult<()>;

    /// Empty when the day was never touched.
    fn get_daily_report(&self, day: NaiveDate) -> AppResult<DailyReport>;
    fn set_daily_report(&self, day: NaiveDate, sessions: &DailyReport) -> AppResult<()>;

    /// Append a line to the internal audit log, if the store keeps one.
    fn record(&self, _operation: &str, _target: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

pub struct SqliteReportRepository {
    pool: DbPool,
}

impl SqliteReportRepository {
    /// Open the database at `path` and bring its schema up to date.
    pub fn open(path: &Path) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    fn get_value(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .pool
            .conn
            .query_row("SELECT value FROM state WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_value(&self, key: &str, value: &str) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT INTO state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn log_entries(&self) -> AppResult<Vec<LogEntry>> {
        load_log(&self.pool.conn)
    }
}

fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

impl ReportRepository for SqliteReportRepository {
    fn get_status(&self) -> AppResult<Status> {
        match self.get_value(CURRENT_STATE_KEY)? {
            Some(v) => Status::from_db_str(&v).ok_or(AppError::InvalidStatus(v)),
            None => Ok(Status::Off),
        }
    }

    fn set_status(&self, status: Status) -> AppResult<()> {
        self.set_value(CURRENT_STATE_KEY, status.to_db_str())
    }

    fn get_last_activity_at(&self) -> AppResult<Option<DateTime<Local>>> {
        let Some(v) = self.get_value(LAST_EVENT_AT_KEY)? else {
            return Ok(None);
        };
        let t = DateTime::parse_from_rfc3339(&v).map_err(|_| AppError::InvalidTime(v.clone()))?;
        Ok(Some(t.with_timezone(&Local)))
    }

    fn set_last_activity_at(&self, at: DateTime<Local>) -> AppResult<()> {
        self.set_value(LAST_EVENT_AT_KEY, &at.to_rfc3339())
    }

    fn get_daily_report(&self, day: NaiveDate) -> AppResult<DailyReport> {
        let raw = self
            .pool
            .conn
            .query_row(
                "SELECT sessions FROM reports WHERE date = ?1",
                [day_key(day)],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(DailyReport::new()),
        }
    }

    fn set_daily_report(&self, day: NaiveDate, sessions: &DailyReport) -> AppResult<()> {
        let json = serde_json::to_string(sessions)?;
        self.pool.conn.execute(
            "INSERT INTO reports (date, sessions) VALUES (?1, ?2)
             ON CONFLICT(date) DO UPDATE SET sessions = excluded.sessions",
            params![day_key(day), json],
        )?;
        Ok(())
    }

    fn record(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.pool.conn, operation, target, message)
    }
}
