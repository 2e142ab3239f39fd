use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use lectern_core::{LecternError, domain::content_tree::SyncError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<SyncError> for AppError {
    fn from(err: SyncError) -> Self {
        let status = match &err {
            SyncError::NodeNotFound { .. } => StatusCode::NOT_FOUND,
            SyncError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            SyncError::UnsupportedMime(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.to_string())
    }
}

impl From<LecternError> for AppError {
    fn from(err: LecternError) -> Self {
        match err {
            LecternError::Sync(err) => err.into(),
            LecternError::NotFound(msg) => Self::not_found(msg),
            LecternError::Serialization(err) => Self::bad_request(err.to_string()),
            LecternError::Database(msg) => {
                tracing::error!(error = %msg, "database operation failed");
                Self::internal("Database operation failed")
            }
            LecternError::Internal(msg) => Self::internal(msg),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        Self::new(err.status(), err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_model::{ContentKind, NodeLevel};
    use uuid::Uuid;

    #[test]
    fn sync_errors_map_to_client_statuses() {
        let cases = [
            (
                SyncError::not_found(NodeLevel::Chapter, Uuid::now_v7()),
                StatusCode::NOT_FOUND,
            ),
            (
                SyncError::FileTooLarge { size: 10, limit: 5 },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                SyncError::UnsupportedMime("text/html".into()),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (
                SyncError::MissingAttachment {
                    kind: ContentKind::Video,
                    position: 1,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                SyncError::InvalidContentType("audio".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, status) in cases {
            let message = err.to_string();
            let app_error = AppError::from(LecternError::from(err));
            assert_eq!(app_error.status, status);
            assert_eq!(app_error.message, message);
        }
    }

    #[test]
    fn database_details_are_not_leaked() {
        let err = AppError::from(LecternError::Database(
            "Failed to upsert chapter: connection reset".into(),
        ));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Database operation failed");
    }
}
