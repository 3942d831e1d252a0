//! Repository Integration Tests
//!
//! Tests for TodoRepository with in-memory SQLite database.

use crate::domain::{DomainError, NewTodo, Todo};
use crate::repository::{init_db, Repository, TodoRepository};
use std::path::PathBuf;

async fn setup_test_db() -> TodoRepository {
    // Use in-memory database for tests
    let db_state = init_db(&PathBuf::from(":memory:")).expect("Failed to init test DB");
    TodoRepository::new(db_state.conn)
}

fn new_todo(label: &str) -> Todo {
    NewTodo { label: label.to_string() }.into_todo().expect("valid label")
}

#[tokio::test]
async fn test_create_todo() {
    let repo = setup_test_db().await;

    let created = repo.create(&new_todo("Test todo")).await.expect("Failed to create");

    assert!(!created.id.is_empty());
    assert_eq!(created.label, "Test todo");
}

#[tokio::test]
async fn test_created_todo_is_listed() {
    let repo = setup_test_db().await;

    let created = repo.create(&new_todo("Find me")).await.expect("Failed to create");

    assert_eq!(repo.list().await.expect("List failed"), vec![created]);
}

#[tokio::test]
async fn test_list_keeps_insertion_order() {
    let repo = setup_test_db().await;

    for label in ["first", "second", "third"] {
        repo.create(&new_todo(label)).await.unwrap();
    }

    let labels: Vec<_> = repo.list().await.expect("List failed").into_iter().map(|t| t.label).collect();
    assert_eq!(labels, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_delete_todo() {
    let repo = setup_test_db().await;

    let created = repo.create(&new_todo("To delete")).await.unwrap();
    repo.delete(&created.id).await.expect("Delete failed");

    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let repo = setup_test_db().await;

    let err = repo.delete(&"missing".to_string()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn test_duplicate_id_is_conflict() {
    let repo = setup_test_db().await;

    let todo = new_todo("once");
    repo.create(&todo).await.unwrap();
    let err = repo.create(&todo).await.unwrap_err();

    assert!(matches!(err, DomainError::Conflict(_)));
}
