use lectern_model::{ContentKind, NodeLevel};
use thiserror::Error;
use uuid::Uuid;

/// Failures that abort a content tree synchronization.
///
/// Every variant is fatal to the request; nothing is retried and nothing is
/// written once one of these is raised.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("{level} {id} not found")]
    NodeNotFound { level: NodeLevel, id: Uuid },

    #[error(
        "missing attachment for {kind} content at traversal position {position}"
    )]
    MissingAttachment { kind: ContentKind, position: usize },

    #[error("invalid content type '{0}'")]
    InvalidContentType(String),

    #[error("invalid quiz payload: {0}")]
    InvalidQuizPayload(String),

    #[error("attachment of {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: usize, limit: usize },

    #[error("unsupported attachment mime type '{0}'")]
    UnsupportedMime(String),

    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

impl SyncError {
    pub fn not_found(level: NodeLevel, id: impl Into<Uuid>) -> Self {
        SyncError::NodeNotFound {
            level,
            id: id.into(),
        }
    }

    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        SyncError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
