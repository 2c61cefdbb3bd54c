use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::{EditLogic, EditRequest};
use crate::core::reporter::Reporter;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::date::parse_date;
use crate::utils::time::parse_optional_time;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        date,
        session,
        brk,
        start,
        end,
        delete,
    } = cmd
    {
        let day = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
        let req = EditRequest {
            session: *session,
            brk: *brk,
            start: parse_optional_time(start.as_ref())?,
            end: parse_optional_time(end.as_ref())?,
            delete: *delete,
        };

        if !req.delete && req.start.is_none() && req.end.is_none() {
            messages::warning("Nothing to change: pass --in, --out or --delete");
            return Ok(());
        }

        let settings = cfg.settings()?;
        let reporter = Reporter::open(cfg, &settings)?;
        let report = EditLogic::edit(&reporter, day, &req)?;

        messages::success(format!("{} updated: {} session(s)", day, report.len()));
    }
    Ok(())
}
