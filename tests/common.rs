#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, TimeZone};
use rworkwatch::config::{Config, Settings};
use rworkwatch::core::reporter::Reporter;
use rworkwatch::db::lock::FileMutex;
use rworkwatch::db::repository::SqliteReportRepository;
use rworkwatch::errors::{AppError, AppResult};
use rworkwatch::ui::notifier::Notifier;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub fn rww() -> Command {
    cargo_bin_cmd!("rworkwatch")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworkwatch.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(path.with_extension("lock")).ok();
    db_path
}

/// Local instant in January 2024 (no DST change in that month).
pub fn jan(day: u32, h: u32, m: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 1, day, h, m, 0).unwrap()
}

/// Notifier that remembers the titles it was asked to show.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub titles: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, _message: &str) -> AppResult<()> {
        self.titles.lock().unwrap().push(title.to_string());
        Ok(())
    }
}

pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, _title: &str, _message: &str) -> AppResult<()> {
        Err(AppError::Notify("no display".into()))
    }
}

/// Reporter over a fresh database in `dir` with default thresholds
/// (shift 5h, break after 35m, finish after 4h).
pub fn reporter_in(dir: &Path, notifier: Box<dyn Notifier>) -> Reporter<SqliteReportRepository> {
    reporter_with(dir, notifier, &Config::default().settings().unwrap())
}

pub fn reporter_with(
    dir: &Path,
    notifier: Box<dyn Notifier>,
    settings: &Settings,
) -> Reporter<SqliteReportRepository> {
    let db = dir.join("rworkwatch.sqlite");
    let repo = SqliteReportRepository::open(&db).unwrap();
    let lock = FileMutex::new(dir.join("rworkwatch.lock")).unwrap();
    Reporter::new(repo, lock, notifier, settings)
}
