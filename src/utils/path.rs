//! Path utilities: expand ~, derive sibling files of the database.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Lock file guarding the given database (`x.sqlite` -> `x.lock`).
pub fn lock_file_for(db_path: &Path) -> PathBuf {
    db_path.with_extension("lock")
}

/// Directory holding the database; log files live next to it.
pub fn data_dir_for(db_path: &Path) -> PathBuf {
    match db_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
