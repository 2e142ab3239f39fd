//! Course content authoring endpoints.
//!
//! An edit arrives as `multipart/form-data`: one `descriptor` part carrying
//! the JSON [`CourseUpdate`], and any number of `files` parts. File parts keep
//! their submission order, which is the order media items consume them in.

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use lectern_core::application::{ContentSnapshot, EditOutcome};
use lectern_model::{Attachment, CourseId, CourseUpdate};
use tracing::debug;
use uuid::Uuid;

use crate::{
    AppState,
    infra::errors::{AppError, AppResult},
};

pub const DESCRIPTOR_FIELD: &str = "descriptor";
pub const FILES_FIELD: &str = "files";

/// Declared mime for file parts sent without a `Content-Type`.
const FALLBACK_MIME: &str = "application/octet-stream";

pub async fn get_course_content(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> AppResult<Json<ContentSnapshot>> {
    let snapshot = state
        .content
        .content_snapshot(CourseId::from(course_id))
        .await?;
    Ok(Json(snapshot))
}

pub async fn edit_course_content(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<EditOutcome>> {
    let (update, attachments) = decode_edit_request(multipart).await?;
    let outcome = state
        .content
        .edit_course_content(CourseId::from(course_id), &update, attachments)
        .await?;
    Ok(Json(outcome))
}

/// Split a multipart edit into its descriptor and ordered attachment list.
pub async fn decode_edit_request(
    mut multipart: Multipart,
) -> Result<(CourseUpdate, Vec<Attachment>), AppError> {
    let mut descriptor: Option<CourseUpdate> = None;
    let mut attachments = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(DESCRIPTOR_FIELD) => {
                if descriptor.is_some() {
                    return Err(AppError::bad_request(
                        "descriptor part supplied more than once",
                    ));
                }
                let raw = field.bytes().await?;
                let update = serde_json::from_slice(&raw).map_err(|err| {
                    AppError::bad_request(format!("invalid descriptor: {err}"))
                })?;
                descriptor = Some(update);
            }
            Some(FILES_FIELD) => {
                let mime_type = field
                    .content_type()
                    .unwrap_or(FALLBACK_MIME)
                    .to_ascii_lowercase();
                let file_name = field.file_name().map(str::to_owned);
                let data = field.bytes().await?;

                let mut attachment = Attachment::new(mime_type, data);
                if let Some(file_name) = file_name {
                    attachment = attachment.with_file_name(file_name);
                }
                debug!(
                    position = attachments.len(),
                    mime = %attachment.mime_type,
                    len = attachment.len(),
                    "received attachment"
                );
                attachments.push(attachment);
            }
            other => {
                return Err(AppError::bad_request(format!(
                    "unexpected multipart field '{}'",
                    other.unwrap_or_default()
                )));
            }
        }
    }

    let descriptor = descriptor.ok_or_else(|| {
        AppError::bad_request("missing descriptor part")
    })?;
    Ok((descriptor, attachments))
}
