//! Desktop notifications for state transitions.
//!
//! Delivery is best-effort: callers log a failed notification and carry on.

use crate::errors::{AppError, AppResult};
use std::process::Command;

pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str) -> AppResult<()>;
}

/// Uses the platform's notification command (`osascript` / `notify-send`).
pub struct OsNotifier;

/// Drops every notification (`notifications: false`).
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _title: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

fn escape_applescript_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn run(cmd: &mut Command) -> AppResult<()> {
    let output = cmd.output().map_err(|e| AppError::Notify(e.to_string()))?;
    if output.status.success() {
        return Ok(());
    }
    Err(AppError::Notify(
        String::from_utf8_lossy(&output.stderr).trim().to_string(),
    ))
}

impl Notifier for OsNotifier {
    fn notify(&self, title: &str, message: &str) -> AppResult<()> {
        if cfg!(target_os = "macos") {
            let script = format!(
                r#"display notification "{}" with title "rworkwatch" subtitle "{}" sound name "Blow""#,
                escape_applescript_string(message),
                escape_applescript_string(title),
            );
            run(Command::new("osascript").arg("-e").arg(script))
        } else if cfg!(target_os = "linux") {
            run(Command::new("notify-send")
                .arg("--app-name=rworkwatch")
                .arg(title)
                .arg(message))
        } else {
            Err(AppError::Notify(
                "no notification command on this platform".into(),
            ))
        }
    }
}

/// Pick the notifier matching the `notifications` config flag.
pub fn from_config(enabled: bool) -> Box<dyn Notifier> {
    if enabled {
        Box::new(OsNotifier)
    } else {
        Box::new(SilentNotifier)
    }
}
