//! Frontend Errors
//!
//! Error taxonomy for the sync layer. None of these are fatal to the session.

use serde::Deserialize;
use thiserror::Error;

/// Input rejected locally; never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("todo label cannot be empty")]
    EmptyLabel,
}

/// A store command failed, or the bridge could not carry it.
///
/// The tagged variants mirror the backend `DomainError` wire shape
/// `{ "kind": ..., "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Deserialize)]
#[serde(tag = "kind", content = "message")]
pub enum CommandError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("store error: {0}")]
    Internal(String),
    #[serde(skip)]
    #[error("bridge error: {0}")]
    Bridge(String),
}

impl CommandError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CommandError::NotFound(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("sync controller already initialized")]
    AlreadyInitialized,
}

pub type SyncResult<T> = Result<T, SyncError>;
