//! Shifted clock: maps instants onto work days.
//!
//! A work day starts at `00:00 + shift` local time and lasts 24 hours, so
//! with a 5h shift anything before 05:00 still belongs to the previous date.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

#[derive(Debug, Clone, Copy)]
pub struct ShiftedClock {
    shift: Duration,
}

impl ShiftedClock {
    pub fn new(shift: Duration) -> Self {
        Self { shift }
    }

    /// Work day (report key) an instant belongs to.
    pub fn work_day_of(&self, t: &DateTime<Local>) -> AppResult<NaiveDate> {
        t.checked_sub_signed(self.shift)
            .map(|shifted| shifted.date_naive())
            .ok_or_else(|| AppError::InvalidTime(format!("{} UTC", t.naive_utc())))
    }

    /// True when `a` and `b` fall on different work days.
    pub fn is_overnight(&self, a: &DateTime<Local>, b: &DateTime<Local>) -> AppResult<bool> {
        Ok(self.work_day_of(a)? != self.work_day_of(b)?)
    }

    /// Instant at which the work day containing `t` ends.
    pub fn shifted_midnight(&self, t: &DateTime<Local>) -> AppResult<DateTime<Local>> {
        let day = self.work_day_of(t)?;
        let next = day
            .succ_opt()
            .ok_or_else(|| AppError::InvalidDate(day.to_string()))?;
        local_instant(next.and_time(NaiveTime::MIN))?
            .checked_add_signed(self.shift)
            .ok_or_else(|| AppError::InvalidDate(next.to_string()))
    }

    /// Resolve a wall-clock time entered for a work day.
    /// Times before the shift belong to the following calendar date.
    pub fn instant_on(&self, day: NaiveDate, time: NaiveTime) -> AppResult<DateTime<Local>> {
        let date = if time.signed_duration_since(NaiveTime::MIN) < self.shift {
            day.succ_opt()
                .ok_or_else(|| AppError::InvalidDate(day.to_string()))?
        } else {
            day
        };
        local_instant(date.and_time(time))
    }
}

/// Local instant for a naive datetime, skipping forward over a DST gap.
fn local_instant(naive: NaiveDateTime) -> AppResult<DateTime<Local>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(naive + Duration::hours(1)))
                .earliest()
        })
        .ok_or_else(|| AppError::InvalidTime(naive.to_string()))
}
