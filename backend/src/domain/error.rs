//! Error type shared by the storage and domain layers.

use std::time::Duration;

/// Every failure a farm operation can surface to its caller.
///
/// `NotFound` is kept apart from `Storage` so callers can tell "no such
/// record" from "the database is unavailable".
#[derive(Debug, thiserror::Error)]
pub enum FarmError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("failed to decode slot list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("corrupt {column} value in storage: {value:?}")]
    CorruptColumn { column: &'static str, value: String },

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
}

impl FarmError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        FarmError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        FarmError::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FarmError::NotFound { .. })
    }
}

pub type FarmResult<T> = Result<T, FarmError>;
