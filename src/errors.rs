//! Unified application error type.
//! All modules (db, core, cli, events, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Invalid stored report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid stored status: {0}")]
    InvalidStatus(String),

    // ---------------------------
    // State machine
    // ---------------------------
    /// Status says working/breaking but no activity was ever recorded.
    #[error("Inconsistent state: {0}")]
    Consistency(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    // ---------------------------
    // Edit errors
    // ---------------------------
    #[error("No session #{0} for this day")]
    InvalidSession(usize),

    #[error("No break #{0} in this session")]
    InvalidBreak(usize),

    #[error("Session #{0} is still being recorded; stop watching before closing or deleting it")]
    SessionInProgress(usize),

    // ---------------------------
    // Collaborators
    // ---------------------------
    #[error("Notification failed: {0}")]
    Notify(String),

    #[error("Watcher {name} failed: {message}")]
    Watcher { name: String, message: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
