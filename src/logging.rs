//! Monitor logging: `tracing` events go to `rworkwatch.log` next to the database.

use crate::errors::{AppError, AppResult};
use std::env;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "rworkwatch.log";
pub const DEBUG_ENV: &str = "RWORKWATCH_DEBUG_LOG";

fn debug_enabled() -> bool {
    env::var(DEBUG_ENV)
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}

fn filter() -> EnvFilter {
    if debug_enabled() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Install the global subscriber. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init_file_logging(dir: &Path) -> AppResult<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::Other(format!("cannot initialize logging: {e}")))?;

    Ok(guard)
}
