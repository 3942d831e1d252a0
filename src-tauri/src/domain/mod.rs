//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage dependencies (serde for serialization, uuid for ids).

mod entity;
mod todo;

pub use entity::{Entity, DomainError, DomainResult};
pub use todo::{NewTodo, Todo, MAX_LABEL_LEN};
