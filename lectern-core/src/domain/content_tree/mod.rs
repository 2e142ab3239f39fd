//! Course content tree synchronization engine.
//!
//! Leaves first: [`validators`] guard attachments and scalar fields, [`quiz`]
//! canonicalizes quiz payloads, [`attachment_cursor`] binds the flat upload
//! list to media items, and [`synchronizer`] walks the submitted tree using
//! all three. [`export`] produces the descriptor form of a stored tree.

pub mod attachment_cursor;
pub mod errors;
pub mod export;
pub mod quiz;
pub mod report;
pub mod synchronizer;
pub mod validators;

pub use attachment_cursor::AttachmentCursor;
pub use errors::SyncError;
pub use export::export_descriptor;
pub use report::{LevelCounts, SyncOutcome, SyncReport};
pub use synchronizer::TreeSynchronizer;
pub use validators::{
    AttachmentLimits, DEFAULT_MAX_ATTACHMENT_BYTES, MEDIA_MIME_FAMILIES,
    NodeValidator,
};
