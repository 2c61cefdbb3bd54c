use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use crate::utils::time::{parse_duration, to_chrono};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Work days start at 00:00 + shift.
    #[serde(default = "default_shift_duration")]
    pub shift_duration: String,
    #[serde(default = "default_polling_interval")]
    pub polling_interval: String,
    /// Inactivity after which a break starts.
    #[serde(default = "default_start_break_interval")]
    pub start_break_interval: String,
    /// Inactivity after which the work session ends.
    #[serde(default = "default_finish_working_interval")]
    pub finish_working_interval: String,
    #[serde(default = "default_mouse_sample_interval")]
    pub mouse_sample_interval: String,
    #[serde(default = "default_mouse_threshold_px")]
    pub mouse_threshold_px: f64,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_shift_duration() -> String {
    "5h".to_string()
}
fn default_polling_interval() -> String {
    "1s".to_string()
}
fn default_start_break_interval() -> String {
    "35m".to_string()
}
fn default_finish_working_interval() -> String {
    "4h".to_string()
}
fn default_mouse_sample_interval() -> String {
    "30s".to_string()
}
fn default_mouse_threshold_px() -> f64 {
    100.0
}
fn default_notifications() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            shift_duration: default_shift_duration(),
            polling_interval: default_polling_interval(),
            start_break_interval: default_start_break_interval(),
            finish_working_interval: default_finish_working_interval(),
            mouse_sample_interval: default_mouse_sample_interval(),
            mouse_threshold_px: default_mouse_threshold_px(),
            notifications: default_notifications(),
        }
    }
}

/// Parsed, typed view of the configuration used by the monitor.
#[derive(Debug, Clone)]
pub struct Settings {
    pub shift_duration: chrono::Duration,
    pub polling_interval: Duration,
    pub start_break_interval: chrono::Duration,
    pub finish_working_interval: chrono::Duration,
    pub mouse_sample_interval: Duration,
    pub mouse_threshold_px: f64,
    pub notifications: bool,
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rworkwatch")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".rworkwatch")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rworkwatch.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rworkwatch.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Self::from_yaml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Database path with `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn settings(&self) -> AppResult<Settings> {
        if !(self.mouse_threshold_px.is_finite() && self.mouse_threshold_px >= 0.0) {
            return Err(AppError::Config(format!(
                "mouse_threshold_px must be a non-negative number, got {}",
                self.mouse_threshold_px
            )));
        }

        let polling_interval = parse_duration(&self.polling_interval)?;
        if polling_interval.is_zero() {
            return Err(AppError::Config("polling_interval must be positive".into()));
        }

        let shift_duration = to_chrono("shift_duration", parse_duration(&self.shift_duration)?)?;
        if shift_duration >= chrono::Duration::days(1) {
            return Err(AppError::Config(
                "shift_duration must be shorter than a day".into(),
            ));
        }

        Ok(Settings {
            shift_duration,
            polling_interval,
            start_break_interval: to_chrono(
                "start_break_interval",
                parse_duration(&self.start_break_interval)?,
            )?,
            finish_working_interval: to_chrono(
                "finish_working_interval",
                parse_duration(&self.finish_working_interval)?,
            )?,
            mouse_sample_interval: parse_duration(&self.mouse_sample_interval)?,
            mouse_threshold_px: self.mouse_threshold_px,
            notifications: self.notifications,
        })
    }

    /// Initialize configuration directory and file.
    /// Returns the database path the new configuration points to.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = expand_tilde(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("cannot create {}: {}", parent.display(), e),
                )
            })?;
        }

        Ok(db_path)
    }
}
