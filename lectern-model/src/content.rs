use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Font size given to newly created text items that do not specify one.
pub const DEFAULT_FONT_SIZE: i32 = 16;

/// The `type` tag of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Image,
    Video,
    Quiz,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Image => "image",
            ContentKind::Video => "video",
            ContentKind::Quiz => "quiz",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized content type tag; carries the raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContentKind(pub String);

impl fmt::Display for UnknownContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown content type '{}'", self.0)
    }
}

impl std::error::Error for UnknownContentKind {}

impl FromStr for ContentKind {
    type Err = UnknownContentKind;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ContentKind::Text),
            "image" => Ok(ContentKind::Image),
            "video" => Ok(ContentKind::Video),
            "quiz" => Ok(ContentKind::Quiz),
            _ => Err(UnknownContentKind(raw.to_string())),
        }
    }
}

/// Styled text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub body: String,
    pub font_size: i32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<String>,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            body: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            bold: false,
            italic: false,
            underline: false,
            color: None,
        }
    }
}

/// Binary image or video payload taken from an uploaded attachment.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaContent {
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(with = "crate::base64_bytes")]
    pub data: Vec<u8>,
}

impl fmt::Debug for MediaContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaContent")
            .field("mime_type", &self.mime_type)
            .field("file_name", &self.file_name)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Canonical quiz document, always an object with a top-level `questions` key.
///
/// Constructed by the quiz normalizer in `lectern-core`; the raw value is kept
/// verbatim so unknown keys next to `questions` survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizDocument(serde_json::Value);

impl QuizDocument {
    /// Wrap a value that already has the canonical shape.
    ///
    /// Callers are responsible for the `{ "questions": ... }` invariant.
    pub fn from_canonical(value: serde_json::Value) -> Self {
        QuizDocument(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Compact JSON with object keys in sorted order.
    pub fn to_canonical_string(&self) -> String {
        self.0.to_string()
    }
}

/// Mutually exclusive field groups of a content item, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBody {
    Text(TextContent),
    Image(MediaContent),
    Video(MediaContent),
    Quiz { document: QuizDocument },
}

impl ContentBody {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentBody::Text(_) => ContentKind::Text,
            ContentBody::Image(_) => ContentKind::Image,
            ContentBody::Video(_) => ContentKind::Video,
            ContentBody::Quiz { .. } => ContentKind::Quiz,
        }
    }

    pub fn media(&self) -> Option<&MediaContent> {
        match self {
            ContentBody::Image(media) | ContentBody::Video(media) => {
                Some(media)
            }
            _ => None,
        }
    }
}
