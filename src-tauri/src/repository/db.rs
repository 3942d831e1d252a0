//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::DomainError;

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::SqliteFailure(code, _) if code.code == rusqlite::ErrorCode::ConstraintViolation => {
                DomainError::Conflict(e.to_string())
            }
            _ => DomainError::Internal(e.to_string()),
        }
    }
}

/// Shared connection handle
#[derive(Clone)]
pub struct DbState {
    pub conn: Arc<Mutex<Connection>>,
}

impl DbState {
    fn new(conn: Connection) -> Self {
        Self { conn: Arc::new(Mutex::new(conn)) }
    }
}

/// Open (or create) the database at `db_path` and run migrations.
/// `:memory:` gives a private in-memory database.
pub fn init_db(db_path: &Path) -> Result<DbState, String> {
    let conn = if db_path.as_os_str() == ":memory:" {
        Connection::open_in_memory()
    } else {
        Connection::open(db_path)
    }
    .map_err(|e| format!("Failed to open db {}: {}", db_path.display(), e))?;

    run_migrations(&conn)?;
    log::info!("Database ready at {}", db_path.display());

    Ok(DbState::new(conn))
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS todos (
            id TEXT PRIMARY KEY NOT NULL,
            label TEXT NOT NULL
         );",
    )
    .map_err(|e| format!("Failed to migrate: {}", e))
}
