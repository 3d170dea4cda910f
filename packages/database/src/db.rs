//! Database connection utilities.

use std::path::{Path, PathBuf};

use switchy_database::Database;
use switchy_database_connection::init_sqlite_rusqlite;

/// Default on-disk location of the sample database.
pub const DEFAULT_DB_PATH: &str = "data/samples.db";

/// Resolves the database path from the `SAMPLE_MAP_DB` environment
/// variable, falling back to [`DEFAULT_DB_PATH`].
#[must_use]
pub fn db_path_from_env() -> PathBuf {
    std::env::var("SAMPLE_MAP_DB").map_or_else(|_| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from)
}

/// Opens the `SQLite` database at the given path, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the database
/// cannot be opened.
pub fn connect(path: &Path) -> Result<Box<dyn Database>, Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let db = init_sqlite_rusqlite(Some(path))?;
    Ok(db)
}

/// Opens the `SQLite` database at the path from the environment.
///
/// # Errors
///
/// Returns an error if the database cannot be opened.
pub fn connect_from_env() -> Result<Box<dyn Database>, Box<dyn std::error::Error>> {
    connect(&db_path_from_env())
}

/// Opens an in-memory `SQLite` database.
///
/// Used by tests to substitute the shared store without touching disk.
///
/// # Errors
///
/// Returns an error if the database cannot be opened.
pub fn connect_in_memory() -> Result<Box<dyn Database>, Box<dyn std::error::Error>> {
    let db = init_sqlite_rusqlite(None)?;
    Ok(db)
}
