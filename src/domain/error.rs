//! Domain Errors

use thiserror::Error;

use super::TodoId;

/// Common result type for to-do operations
pub type TodoResult<T> = Result<T, TodoError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// No item with this id (stale row, already deleted)
    #[error("todo {0} not found")]
    NotFound(TodoId),
    #[error("invalid status {0:?}")]
    InvalidStatus(String),
}
