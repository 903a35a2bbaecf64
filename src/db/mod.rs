//! Database helpers: connection setup, path handling and the per-table
//! query modules.

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{path::Path, str::FromStr};

pub mod emails;
pub mod items;
pub mod migrations;

/// Location value that selects a private in-memory database.
pub const MEMORY: &str = ":memory:";

/// Open a pool for the SQLite database at `database_path`.
///
/// The file and its parent folder are created when missing. An in-memory
/// database lives inside a single connection, so that pool is capped at one
/// connection that is never recycled.
pub async fn connect(database_path: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    if database_path == MEMORY {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        return SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await;
    }

    ensure_parent_dir(database_path)?;
    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Ensure the parent folder of a SQLite file exists.
pub fn ensure_parent_dir(database_path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
