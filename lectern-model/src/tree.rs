use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

use crate::{
    content::{ContentBody, ContentKind},
    ids::{ChapterId, ContentItemId, CourseId, SubchapterId},
};

/// Common view over sortable sibling nodes.
pub trait TreeNode: Debug + Clone {
    type Id: Copy + Eq + Ord + Debug + Into<Uuid>;

    fn id(&self) -> Self::Id;
    fn order(&self) -> i32;
}

/// Sort siblings by display order, breaking ties on the persisted id.
pub fn sort_siblings<N: TreeNode>(nodes: &mut [N]) {
    nodes.sort_by_key(|node| (node.order(), node.id()));
}

/// Root of a content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub description: String,
    /// Price in marketplace points.
    pub price: i64,
    /// Rating average maintained by the review subsystem.
    pub review: f32,
    pub review_number: i32,
    pub chapters: Vec<Chapter>,
}

impl Course {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CourseId::new(),
            name: name.into(),
            description: String::new(),
            price: 0,
            review: 0.0,
            review_number: 0,
            chapters: Vec::new(),
        }
    }

    pub fn chapter(&self, id: ChapterId) -> Option<&Chapter> {
        self.chapters.iter().find(|chapter| chapter.id == id)
    }

    /// Depth-first iterator over every content item in the tree.
    pub fn items(&self) -> impl Iterator<Item = &ContentItem> {
        self.chapters
            .iter()
            .flat_map(|chapter| chapter.subchapters.iter())
            .flat_map(|subchapter| subchapter.items.iter())
    }

    pub fn subchapters(&self) -> impl Iterator<Item = &Subchapter> {
        self.chapters
            .iter()
            .flat_map(|chapter| chapter.subchapters.iter())
    }

    pub fn find_item(&self, id: ContentItemId) -> Option<&ContentItem> {
        self.items().find(|item| item.id == id)
    }

    pub fn find_subchapter(&self, id: SubchapterId) -> Option<&Subchapter> {
        self.subchapters().find(|subchapter| subchapter.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: ChapterId,
    pub course_id: CourseId,
    pub order: i32,
    pub name: String,
    pub review: f32,
    pub review_number: i32,
    pub subchapters: Vec<Subchapter>,
}

impl Chapter {
    pub fn new(course_id: CourseId, order: i32, name: impl Into<String>) -> Self {
        Self {
            id: ChapterId::new(),
            course_id,
            order,
            name: name.into(),
            review: 0.0,
            review_number: 0,
            subchapters: Vec::new(),
        }
    }
}

impl TreeNode for Chapter {
    type Id = ChapterId;

    fn id(&self) -> ChapterId {
        self.id
    }

    fn order(&self) -> i32 {
        self.order
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subchapter {
    pub id: SubchapterId,
    pub chapter_id: ChapterId,
    pub order: i32,
    pub name: String,
    pub items: Vec<ContentItem>,
}

impl Subchapter {
    pub fn new(
        chapter_id: ChapterId,
        order: i32,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: SubchapterId::new(),
            chapter_id,
            order,
            name: name.into(),
            items: Vec::new(),
        }
    }
}

impl TreeNode for Subchapter {
    type Id = SubchapterId;

    fn id(&self) -> SubchapterId {
        self.id
    }

    fn order(&self) -> i32 {
        self.order
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: ContentItemId,
    pub subchapter_id: SubchapterId,
    pub order: i32,
    pub content: ContentBody,
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        self.content.kind()
    }
}

impl TreeNode for ContentItem {
    type Id = ContentItemId;

    fn id(&self) -> ContentItemId {
        self.id
    }

    fn order(&self) -> i32 {
        self.order
    }
}
