//! Store Configuration
//!
//! Where the database and logs live. Resolved once at setup.

use std::ffi::OsString;
use std::path::PathBuf;
use tauri::Manager;

/// Overrides the database file location
pub const DB_PATH_ENV: &str = "TODO_SYNC_DB";

const DB_FILE_NAME: &str = "todos.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
}

impl StoreConfig {
    /// Resolve from the app's data/log dirs, honoring `TODO_SYNC_DB`
    pub fn resolve(app_handle: &tauri::AppHandle) -> Result<Self, String> {
        let data_dir = app_handle
            .path()
            .app_data_dir()
            .map_err(|e| format!("No app data dir: {}", e))?;
        let log_dir = app_handle
            .path()
            .app_log_dir()
            .map_err(|e| format!("No app log dir: {}", e))?;

        let config = Self::from_parts(data_dir, log_dir, std::env::var_os(DB_PATH_ENV));
        if let Some(parent) = config.db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        Ok(config)
    }

    fn from_parts(data_dir: PathBuf, log_dir: PathBuf, db_override: Option<OsString>) -> Self {
        let db_path = match db_override {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => data_dir.join(DB_FILE_NAME),
        };
        Self { db_path, log_dir }
    }
}
