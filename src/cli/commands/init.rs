use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::reporter::Reporter;
use crate::db::repository::ReportRepository;
use crate::errors::AppResult;
use crate::ui::messages;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped with `--test`)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;

    let cfg = Config {
        database: db_path.to_string_lossy().to_string(),
        ..Config::load()?
    };
    let settings = cfg.settings()?;

    println!("⚙️  Initializing rworkwatch…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", db_path.display());

    // Opening runs the migrations.
    let reporter = Reporter::open(&cfg, &settings)?;

    if let Err(e) = reporter.with_repo(|repo| {
        repo.record(
            "init",
            "Database initialized",
            &format!("Database initialized at {}", db_path.display()),
        )
    }) {
        messages::warning(format!("Failed to write internal log: {}", e));
    }

    messages::success(format!("Database initialized at {}", db_path.display()));
    Ok(())
}
