use thiserror::Error;

use crate::domain::content_tree::SyncError;

#[derive(Error, Debug)]
pub enum LecternError {
    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for LecternError {
    fn from(err: sqlx::Error) -> Self {
        LecternError::Database(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LecternError>;
