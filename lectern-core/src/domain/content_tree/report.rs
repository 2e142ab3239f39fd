use lectern_model::{Course, NodeLevel};
use serde::Serialize;

/// Per-level mutation counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl LevelCounts {
    pub fn total(&self) -> usize {
        self.created + self.updated + self.deleted
    }
}

/// Summary of what one synchronization changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub chapters: LevelCounts,
    pub subchapters: LevelCounts,
    pub items: LevelCounts,
    pub attachments_consumed: usize,
    pub attachments_unused: usize,
    /// Deletion entries whose id matched no existing node.
    pub skipped_deletions: usize,
}

impl SyncReport {
    pub(crate) fn counts_mut(&mut self, level: NodeLevel) -> Option<&mut LevelCounts> {
        match level {
            NodeLevel::Course => None,
            NodeLevel::Chapter => Some(&mut self.chapters),
            NodeLevel::Subchapter => Some(&mut self.subchapters),
            NodeLevel::ContentItem => Some(&mut self.items),
        }
    }

    /// Nodes created, updated or deleted across all levels.
    pub fn touched_nodes(&self) -> usize {
        self.chapters.total() + self.subchapters.total() + self.items.total()
    }
}

/// Result of a successful synchronization: the new tree, not yet persisted.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub course: Course,
    pub report: SyncReport,
}
