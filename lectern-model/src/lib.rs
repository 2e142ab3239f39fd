//! Core data model definitions shared across Lectern crates.
//!
//! The course content tree is a strict ownership hierarchy
//! (`Course -> Chapter -> Subchapter -> ContentItem`). Parent ids stored on
//! child nodes are plain back-references used for persistence and lookup only.
#![allow(missing_docs)]

pub mod attachment;
pub mod catalog;
pub mod content;
pub mod ids;
pub mod level;
pub mod patch;
pub mod tree;
pub mod update;

mod base64_bytes;

pub use attachment::Attachment;
pub use catalog::{CourseSummary, NewCourse};
pub use content::{
    ContentBody, ContentKind, DEFAULT_FONT_SIZE, MediaContent, QuizDocument,
    TextContent, UnknownContentKind,
};
pub use ids::{ChapterId, ContentItemId, CourseId, SubchapterId};
pub use level::NodeLevel;
pub use patch::FieldPatch;
pub use tree::{
    Chapter, ContentItem, Course, Subchapter, TreeNode, sort_siblings,
};
pub use update::{
    ChapterUpdate, ContentItemUpdate, CourseUpdate, NodeUpdate,
    SubchapterUpdate,
};
