use super::watcher_error;
use crate::errors::AppResult;
use std::convert::Infallible;
use std::time::{Duration, Instant};

/// Key presses closer together than this count as one burst.
const BURST_GAP: Duration = Duration::from_secs(1);

/// Global key-press listener.
#[derive(Default)]
pub struct KeyboardWatcher;

impl KeyboardWatcher {
    pub const NAME: &'static str = "KeyboardWatcher";

    pub fn watch<F>(self, on_signal: F) -> AppResult<Infallible>
    where
        F: Fn() + Send + 'static,
    {
        let mut burst = Burst::new(BURST_GAP);

        rdev::listen(move |event| {
            if matches!(event.event_type, rdev::EventType::KeyPress(_)) && burst.hit(Instant::now())
            {
                on_signal();
            }
        })
        .map_err(|e| watcher_error(Self::NAME, format!("{e:?}")))?;

        Err(watcher_error(Self::NAME, "key listener stopped"))
    }
}

/// Collapses a stream of hits into one signal per burst.
#[derive(Debug)]
pub struct Burst {
    gap: Duration,
    last_signal: Option<Instant>,
}

impl Burst {
    pub fn new(gap: Duration) -> Self {
        Self {
            gap,
            last_signal: None,
        }
    }

    /// True when this hit should be reported.
    pub fn hit(&mut self, now: Instant) -> bool {
        match self.last_signal {
            Some(last) if now.duration_since(last) < self.gap => false,
            _ => {
                self.last_signal = Some(now);
                true
            }
        }
    }
}
