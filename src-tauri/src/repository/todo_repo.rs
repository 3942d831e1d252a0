//! Todo Repository Implementation
//!
//! SQLite-backed implementation of Repository<Todo>

use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, Todo};
use super::traits::Repository;

/// SQLite implementation of Todo repository
pub struct TodoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TodoRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        label: row.get(1)?,
    })
}

#[async_trait]
impl Repository<Todo> for TodoRepository {
    async fn create(&self, entity: &Todo) -> DomainResult<Todo> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO todos (id, label) VALUES (?1, ?2)",
            params![entity.id, entity.label],
        )?;
        Ok(entity.clone())
    }

    async fn list(&self) -> DomainResult<Vec<Todo>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT id, label FROM todos ORDER BY rowid ASC")?;
        let todos = stmt
            .query_map([], row_to_todo)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(todos)
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let deleted = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(DomainError::NotFound(format!("todo {}", id)));
        }
        Ok(())
    }
}
