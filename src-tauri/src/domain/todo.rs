//! Todo Entity
//!
//! A single list entry. Ids are assigned here, never by the UI.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{DomainError, DomainResult, Entity};

/// Longest label the store accepts, in characters
pub const MAX_LABEL_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// UUIDv7 text
    pub id: String,
    pub label: String,
}

/// Create payload from the frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub label: String,
}

impl NewTodo {
    /// Validate the label and assign a fresh id
    pub fn into_todo(self) -> DomainResult<Todo> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(DomainError::InvalidInput("label is empty".to_string()));
        }
        if label.chars().count() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidInput(format!(
                "label longer than {} characters",
                MAX_LABEL_LEN
            )));
        }
        Ok(Todo {
            id: Uuid::now_v7().to_string(),
            label: label.to_string(),
        })
    }
}

impl Entity for Todo {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
