use serde::{Deserialize, Serialize};
use std::fmt;

/// Nesting level of a node inside a course content tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeLevel {
    Course,
    Chapter,
    Subchapter,
    ContentItem,
}

impl NodeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeLevel::Course => "course",
            NodeLevel::Chapter => "chapter",
            NodeLevel::Subchapter => "subchapter",
            NodeLevel::ContentItem => "content_item",
        }
    }

    /// Level directly below this one, if any.
    pub fn child(self) -> Option<NodeLevel> {
        match self {
            NodeLevel::Course => Some(NodeLevel::Chapter),
            NodeLevel::Chapter => Some(NodeLevel::Subchapter),
            NodeLevel::Subchapter => Some(NodeLevel::ContentItem),
            NodeLevel::ContentItem => None,
        }
    }
}

impl fmt::Display for NodeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
