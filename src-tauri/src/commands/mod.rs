//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to the todo store.

mod todo_cmd;

pub use todo_cmd::*;
