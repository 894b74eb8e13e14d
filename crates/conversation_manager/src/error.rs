//! History store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    /// Unknown conversation id, or an id owned by someone else. The two
    /// cases are deliberately indistinguishable so that existence never
    /// leaks across owners.
    #[error("Conversation not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Turn index {index} out of range for history of length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<std::io::Error> for HistoryError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HistoryError>;
