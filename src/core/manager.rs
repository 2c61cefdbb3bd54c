//! Event orchestrator.
//!
//! Fans watcher signals into `Reporter::handle_activity` and drives
//! `Reporter::poll` from a ticker. Holds no state of its own.

use crate::core::reporter::Reporter;
use crate::db::repository::ReportRepository;
use crate::errors::{AppError, AppResult};
use crate::events::Watcher;
use crossbeam_channel::{select, tick, unbounded};
use std::convert::Infallible;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info};

pub struct Manager<R: ReportRepository + Send + 'static> {
    reporter: Arc<Reporter<R>>,
    watchers: Vec<Watcher>,
    polling_interval: Duration,
}

impl<R: ReportRepository + Send + 'static> Manager<R> {
    pub fn new(reporter: Arc<Reporter<R>>, watchers: Vec<Watcher>, polling_interval: Duration) -> Self {
        Self {
            reporter,
            watchers,
            polling_interval,
        }
    }

    /// Run until a watcher fails or a poll returns an error.
    pub fn watch(self) -> AppResult<Infallible> {
        let (err_tx, err_rx) = unbounded::<AppError>();

        for watcher in self.watchers {
            let name = watcher.name();
            let reporter = Arc::clone(&self.reporter);
            let err_tx = err_tx.clone();

            thread::Builder::new()
                .name(name.to_string())
                .spawn(move || {
                    info!(watcher = name, "watcher started");
                    let on_signal = move || {
                        debug!(watcher = name, "activity");
                        if let Err(e) = reporter.handle_activity() {
                            error!(watcher = name, error = %e, "failed to handle activity");
                        }
                    };
                    let Err(e) = watcher.watch(on_signal);
                    // The receiver only disappears once the monitor is returning anyway.
                    let _ = err_tx.send(e);
                })?;
        }

        let ticker = tick(self.polling_interval);
        info!(interval = ?self.polling_interval, "monitor running");

        loop {
            select! {
                recv(ticker) -> _ => self.reporter.poll()?,
                recv(err_rx) -> msg => {
                    if let Ok(e) = msg {
                        error!(error = %e, "watcher stopped");
                        return Err(e);
                    }
                }
            }
        }
    }
}
