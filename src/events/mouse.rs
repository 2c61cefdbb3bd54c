use crate::errors::AppResult;
use std::convert::Infallible;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn distance(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Reads the current pointer position.
pub type PointerSource = fn() -> AppResult<Position>;

/// Samples the pointer at a fixed interval; only a move farther than the
/// threshold since the last counted position is activity.
pub struct MouseWatcher {
    sample_interval: Duration,
    tracker: MoveTracker,
    source: PointerSource,
}

impl MouseWatcher {
    pub const NAME: &'static str = "MouseWatcher";

    pub fn new(sample_interval: Duration, threshold_px: f64, source: PointerSource) -> Self {
        Self {
            sample_interval,
            tracker: MoveTracker::new(threshold_px),
            source,
        }
    }

    pub fn watch<F>(mut self, on_signal: F) -> AppResult<Infallible>
    where
        F: Fn() + Send + 'static,
    {
        // A source that cannot be read at startup is fatal.
        let first = (self.source)()?;
        self.tracker.observe(first);

        loop {
            thread::sleep(self.sample_interval);

            let current = match (self.source)() {
                Ok(p) => p,
                Err(e) => {
                    warn!(error = %e, "failed to sample pointer");
                    continue;
                }
            };

            let moved = self.tracker.observe(current);
            debug!(x = current.x, y = current.y, moved, "mouse sample");
            if moved {
                on_signal();
            }
        }
    }
}

#[derive(Debug)]
pub struct MoveTracker {
    threshold_px: f64,
    last: Option<Position>,
}

impl MoveTracker {
    pub fn new(threshold_px: f64) -> Self {
        Self {
            threshold_px,
            last: None,
        }
    }

    /// The first sample only sets the baseline. The baseline moves only
    /// when a move is counted, so slow drifts add up.
    pub fn observe(&mut self, p: Position) -> bool {
        match self.last {
            None => {
                self.last = Some(p);
                false
            }
            Some(last) if last.distance(&p) > self.threshold_px => {
                self.last = Some(p);
                true
            }
            Some(_) => false,
        }
    }
}

#[cfg(target_os = "macos")]
fn core_graphics_pointer() -> AppResult<Position> {
    use core_graphics::event::CGEvent;
    use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

    let source = CGEventSource::new(CGEventSourceStateID::CombinedSessionState)
        .map_err(|_| super::watcher_error(MouseWatcher::NAME, "cannot create event source"))?;
    let event = CGEvent::new(source)
        .map_err(|_| super::watcher_error(MouseWatcher::NAME, "cannot create event"))?;
    let loc = event.location();
    Ok(Position { x: loc.x, y: loc.y })
}

/// Pointer reader for this platform, if there is one.
pub fn system_pointer_source() -> Option<PointerSource> {
    #[cfg(target_os = "macos")]
    {
        Some(core_graphics_pointer)
    }
    #[cfg(not(target_os = "macos"))]
    {
        None
    }
}
