use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::core::reporter::Reporter;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_month;
use chrono::{Datelike, Local};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { month, json } = cmd {
        let settings = cfg.settings()?;
        let reporter = Reporter::open(cfg, &settings)?;

        let (year, month) = match month {
            Some(m) => parse_month(m).ok_or_else(|| AppError::InvalidDate(m.clone()))?,
            None => {
                let today = reporter.clock().work_day_of(&Local::now())?;
                (today.year(), today.month())
            }
        };

        let report = ListLogic::month_report(&reporter, year, month)?;
        ListLogic::print(&report, *json)?;
    }
    Ok(())
}
