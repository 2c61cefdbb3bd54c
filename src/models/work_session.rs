//! Work sessions and breaks as stored in a day's report.
//!
//! A day's report is an ordered list of sessions addressed by position: the
//! state machine only ever touches the *last* session and its *last* break.

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Break {
    pub start_at: DateTime<Local>,
    pub end_at: Option<DateTime<Local>>,
}

impl Break {
    pub fn open(start_at: DateTime<Local>) -> Self {
        Self {
            start_at,
            end_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_at.is_none()
    }

    /// Length of a closed break; open breaks do not count yet.
    pub fn duration(&self) -> Duration {
        match self.end_at {
            Some(end) => end - self.start_at,
            None => Duration::zero(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    pub start_at: DateTime<Local>,
    pub end_at: Option<DateTime<Local>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub breaks: Vec<Break>,
}

/// Older stores wrote `"breaks": null` for sessions without breaks.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Break>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Break>>::deserialize(deserializer)?.unwrap_or_default())
}

impl WorkSession {
    pub fn open(start_at: DateTime<Local>) -> Self {
        Self {
            start_at,
            end_at: None,
            breaks: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_at.is_none()
    }

    /// The trailing break, if it has not ended yet.
    pub fn open_break_mut(&mut self) -> Option<&mut Break> {
        self.breaks.last_mut().filter(|b| b.is_open())
    }

    /// Drop the last break when it never ended. Returns whether one was dropped.
    pub fn trim_trailing_open_break(&mut self) -> bool {
        if self.breaks.last().is_some_and(Break::is_open) {
            self.breaks.pop();
            return true;
        }
        false
    }

    pub fn total_break_time(&self) -> Duration {
        self.breaks
            .iter()
            .fold(Duration::zero(), |acc, b| acc + b.duration())
    }

    /// Time spent working in a closed session; zero while the session is open.
    pub fn total_working_time(&self) -> Duration {
        match self.end_at {
            Some(end) => (end - self.start_at) - self.total_break_time(),
            None => Duration::zero(),
        }
    }
}

pub type DailyReport = Vec<WorkSession>;

/// Positional mutations applied to a whole day's report before it is written back.
pub trait DailyReportExt {
    fn open_session(&mut self, start_at: DateTime<Local>);
    fn close_last_session(&mut self, end_at: DateTime<Local>) -> bool;
    fn start_break_on_last_session(&mut self, start_at: DateTime<Local>) -> bool;
    fn close_open_break(&mut self, end_at: DateTime<Local>) -> bool;
    fn total_working_time(&self) -> Duration;
    fn total_break_time(&self) -> Duration;
}

impl DailyReportExt for DailyReport {
    fn open_session(&mut self, start_at: DateTime<Local>) {
        self.push(WorkSession::open(start_at));
    }

    /// Set `end_at` on the last session and discard a break left open.
    /// A last session that already ended is left alone.
    fn close_last_session(&mut self, end_at: DateTime<Local>) -> bool {
        let Some(last) = self.last_mut().filter(|s| s.is_open()) else {
            return false;
        };
        last.end_at = Some(end_at);
        last.trim_trailing_open_break();
        true
    }

    fn start_break_on_last_session(&mut self, start_at: DateTime<Local>) -> bool {
        let Some(last) = self.last_mut().filter(|s| s.is_open()) else {
            return false;
        };
        last.breaks.push(Break::open(start_at));
        true
    }

    fn close_open_break(&mut self, end_at: DateTime<Local>) -> bool {
        let Some(open) = self.last_mut().and_then(WorkSession::open_break_mut) else {
            return false;
        };
        open.end_at = Some(end_at);
        true
    }

    fn total_working_time(&self) -> Duration {
        self.iter()
            .fold(Duration::zero(), |acc, s| acc + s.total_working_time())
    }

    fn total_break_time(&self) -> Duration {
        self.iter()
            .fold(Duration::zero(), |acc, s| acc + s.total_break_time())
    }
}
