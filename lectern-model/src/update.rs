//! Client-submitted partial edit descriptors for a course content tree.
//!
//! Every editable field is a [`FieldPatch`]. Child lists are `Option<Vec<_>>`:
//! `None` leaves the persisted children untouched, `Some` lists the children
//! the client wants to delete, update or create at that level.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

use crate::{
    ids::{ChapterId, ContentItemId, SubchapterId},
    patch::FieldPatch,
};

/// Shared surface the synchronizer needs from every child descriptor.
pub trait NodeUpdate: Debug {
    type Id: Copy + Eq + Debug + Into<Uuid>;

    /// `None` marks a creation request.
    fn id(&self) -> Option<Self::Id>;
    fn is_deleted(&self) -> bool;
    fn order(&self) -> &FieldPatch<i32>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub name: FieldPatch<String>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub description: FieldPatch<String>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub price: FieldPatch<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapters: Option<Vec<ChapterUpdate>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ChapterId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub order: FieldPatch<i32>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub name: FieldPatch<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subchapters: Option<Vec<SubchapterUpdate>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubchapterUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SubchapterId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub order: FieldPatch<i32>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub name: FieldPatch<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ContentItemUpdate>>,
}

/// Content item descriptor.
///
/// `content_type` stays a raw string so unknown tags surface as a domain
/// error rather than a generic decode failure. Image and video payloads never
/// travel inline: creations take the next attachment from the flat upload
/// list, updates only take one when `update_attachment` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub order: FieldPatch<i32>,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "FieldPatch::is_unset"
    )]
    pub content_type: FieldPatch<String>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub body: FieldPatch<String>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub font_size: FieldPatch<i32>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub bold: FieldPatch<bool>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub italic: FieldPatch<bool>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub underline: FieldPatch<bool>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub color: FieldPatch<Option<String>>,
    /// Raw JSON string or structured value; normalized before storage.
    #[serde(default, skip_serializing_if = "FieldPatch::is_unset")]
    pub quiz: FieldPatch<serde_json::Value>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub update_attachment: bool,
}

macro_rules! impl_node_update {
    ($update:ty, $id:ty) => {
        impl NodeUpdate for $update {
            type Id = $id;

            fn id(&self) -> Option<$id> {
                self.id
            }

            fn is_deleted(&self) -> bool {
                self.deleted.unwrap_or(false)
            }

            fn order(&self) -> &FieldPatch<i32> {
                &self.order
            }
        }
    };
}

impl_node_update!(ChapterUpdate, ChapterId);
impl_node_update!(SubchapterUpdate, SubchapterId);
impl_node_update!(ContentItemUpdate, ContentItemId);
