use crate::model::RecordId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShoeboxError {
    #[error("Record not found: {0}")]
    NotFound(RecordId),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

/// Coarse classification of a failure, for callers that route errors to the
/// user without matching on the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field was missing or malformed; nothing was changed.
    Validation,
    /// The referenced record is no longer in its collection.
    NotFound,
    /// Serialization or storage failed; the in-memory state may be ahead of
    /// the persisted state.
    Persistence,
}

impl ShoeboxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShoeboxError::NotFound(_) => ErrorKind::NotFound,
            ShoeboxError::Validation(_) => ErrorKind::Validation,
            ShoeboxError::Io(_) | ShoeboxError::Serialization(_) | ShoeboxError::Store(_) => {
                ErrorKind::Persistence
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ShoeboxError>;
