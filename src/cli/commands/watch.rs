use crate::config::Config;
use crate::core::manager::Manager;
use crate::core::reporter::Reporter;
use crate::errors::AppResult;
use crate::events::all_watchers;
use crate::logging::{LOG_FILE, init_file_logging};
use crate::ui::messages;
use crate::utils::path::data_dir_for;
use std::sync::Arc;

/// Handle the `watch` command: runs the monitor until it fails or is killed.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let settings = cfg.settings()?;
    let log_dir = data_dir_for(&cfg.database_path());
    let _log_guard = init_file_logging(&log_dir)?;

    let reporter = Arc::new(Reporter::open(cfg, &settings)?);
    let watchers = all_watchers(&settings);

    messages::info(format!(
        "Watching activity with {} (log: {})",
        watchers
            .iter()
            .map(|w| w.name())
            .collect::<Vec<_>>()
            .join(", "),
        log_dir.join(LOG_FILE).display()
    ));

    let manager = Manager::new(reporter, watchers, settings.polling_interval);
    manager.watch().map(|never| match never {})
}
