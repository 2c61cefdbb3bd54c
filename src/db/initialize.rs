use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

/// Prepare a freshly opened database: WAL journaling, then migrations.
/// Schema changes only ever happen in the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    let mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    debug!(journal_mode = %mode, "database opened");

    run_pending_migrations(conn)?;
    Ok(())
}
