use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::core::reporter::Reporter;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let settings = cfg.settings()?;
        let reporter = Reporter::open(cfg, &settings)?;
        let entries = reporter.with_repo(|repo| repo.log_entries())?;
        LogLogic::print_log(&entries)?;
    }

    Ok(())
}
