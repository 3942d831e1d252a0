//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult};

/// Core repository trait for the store's operations
///
/// Generic over any Entity type. There is no update: entities are replaced by
/// delete + create.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Persist a new entity (its id is already assigned)
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// List all entities in insertion order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Delete entity by ID; `NotFound` if nothing was deleted
    async fn delete(&self, id: &T::Id) -> DomainResult<()>;
}
