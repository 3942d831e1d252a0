//! Todo Sync Backend
//!
//! The authoritative todo store. Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: Tauri command handlers

use tauri::Manager;

mod config;
mod domain;
mod repository;
mod commands;

use config::StoreConfig;
use repository::{init_db, TodoRepository};

/// Application state shared across commands
pub struct AppState {
    pub todo_repo: TodoRepository,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let config = StoreConfig::resolve(app.handle())?;

            // Initialize logging
            rolling_logger::init_logger(config.log_dir.clone(), "TodoSync")?;
            log::info!(
                "[{}] App setup starting, db at {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                config.db_path.display()
            );

            let db_state = init_db(&config.db_path).map_err(|e| {
                let _ = rolling_logger::error(&format!("DB init failed: {}", e));
                e
            })?;

            app.manage(AppState {
                todo_repo: TodoRepository::new(db_state.conn),
            });

            let _ = rolling_logger::info("Store ready");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::add_todo,
            commands::delete_todo,
            commands::get_todos,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
