use crate::config::Config;
use crate::core::reporter::Reporter;
use crate::core::status::StatusLogic;
use crate::errors::AppResult;
use chrono::Local;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let settings = cfg.settings()?;
    let reporter = Reporter::open(cfg, &settings)?;
    let summary = StatusLogic::summary(&reporter, Local::now())?;
    StatusLogic::print(&summary);
    Ok(())
}
