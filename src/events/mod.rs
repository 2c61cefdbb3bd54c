//! Activity sources.
//!
//! Every watcher reduces its raw input to a single "the user is here" signal.
//! `watch` blocks for the life of the watcher and only returns on failure.

pub mod keyboard;
pub mod mouse;

use crate::config::Settings;
use crate::errors::{AppError, AppResult};
use std::convert::Infallible;

pub use keyboard::KeyboardWatcher;
pub use mouse::MouseWatcher;

pub enum Watcher {
    Keyboard(KeyboardWatcher),
    Mouse(MouseWatcher),
}

impl Watcher {
    pub fn name(&self) -> &'static str {
        match self {
            Watcher::Keyboard(_) => KeyboardWatcher::NAME,
            Watcher::Mouse(_) => MouseWatcher::NAME,
        }
    }

    pub fn watch<F>(self, on_signal: F) -> AppResult<Infallible>
    where
        F: Fn() + Send + 'static,
    {
        match self {
            Watcher::Keyboard(w) => w.watch(on_signal),
            Watcher::Mouse(w) => w.watch(on_signal),
        }
    }
}

/// Watchers available on this platform.
pub fn all_watchers(settings: &Settings) -> Vec<Watcher> {
    let mut watchers = vec![Watcher::Keyboard(KeyboardWatcher::default())];
    if let Some(source) = mouse::system_pointer_source() {
        watchers.push(Watcher::Mouse(MouseWatcher::new(
            settings.mouse_sample_interval,
            settings.mouse_threshold_px,
            source,
        )));
    }
    watchers
}

pub(crate) fn watcher_error(name: &str, message: impl Into<String>) -> AppError {
    AppError::Watcher {
        name: name.to_string(),
        message: message.into(),
    }
}
