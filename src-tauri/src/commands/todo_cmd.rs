//! Tauri Commands for the Todo Store
//!
//! Exposes create/delete/list to the frontend via Tauri IPC. Every successful
//! mutation is followed by a `client:refresh` broadcast so all open windows
//! re-fetch.

use tauri::{AppHandle, Emitter, State};

use crate::domain::{DomainResult, NewTodo, Todo};
use crate::repository::Repository;
use crate::AppState;

/// Event telling every window that the todo table changed
pub const REFRESH_EVENT: &str = "client:refresh";

/// Create a new todo; returns the id the store assigned
#[tauri::command]
pub async fn add_todo(
    app_handle: AppHandle,
    state: State<'_, AppState>,
    todo: NewTodo,
) -> DomainResult<String> {
    let id = insert_todo(&state.todo_repo, todo).await?;
    notify_changed(&app_handle);
    Ok(id)
}

/// Delete a todo by id
#[tauri::command]
pub async fn delete_todo(
    app_handle: AppHandle,
    state: State<'_, AppState>,
    id: String,
) -> DomainResult<()> {
    remove_todo(&state.todo_repo, &id).await?;
    notify_changed(&app_handle);
    Ok(())
}

/// List all todos in insertion order
#[tauri::command]
pub async fn get_todos(state: State<'_, AppState>) -> DomainResult<Vec<Todo>> {
    state.todo_repo.list().await
}

async fn insert_todo(repo: &impl Repository<Todo>, todo: NewTodo) -> DomainResult<String> {
    let todo = todo.into_todo()?;
    let created = repo.create(&todo).await?;
    log::info!("Created todo {}", created.id);
    Ok(created.id)
}

async fn remove_todo(repo: &impl Repository<Todo>, id: &String) -> DomainResult<()> {
    repo.delete(id).await?;
    log::info!("Deleted todo {}", id);
    Ok(())
}

fn notify_changed(app_handle: &AppHandle) {
    if let Err(e) = app_handle.emit(REFRESH_EVENT, ()) {
        log::warn!("Failed to emit {}: {}", REFRESH_EVENT, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::repository::{init_db, TodoRepository};
    use std::path::PathBuf;

    fn repo() -> TodoRepository {
        let db_state = init_db(&PathBuf::from(":memory:")).expect("Failed to init test DB");
        TodoRepository::new(db_state.conn)
    }

    #[tokio::test]
    async fn test_insert_returns_store_assigned_id() {
        let repo = repo();

        let id = insert_todo(&repo, NewTodo { label: " milk ".into() }).await.unwrap();

        let todos = repo.list().await.unwrap();
        assert_eq!(todos, vec![Todo { id, label: "milk".into() }]);
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_label() {
        let repo = repo();

        let err = insert_todo(&repo, NewTodo { label: "   ".into() }).await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_twice_reports_not_found() {
        let repo = repo();
        let id = insert_todo(&repo, NewTodo { label: "a".into() }).await.unwrap();

        remove_todo(&repo, &id).await.unwrap();
        let err = remove_todo(&repo, &id).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
