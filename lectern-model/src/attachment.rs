use bytes::Bytes;
use std::fmt;

/// One entry of the flat, ordered upload list that accompanies an edit.
///
/// `data` is reference counted so handing the same attachment to several
/// lookups within one request never copies the payload.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: Option<String>,
    pub mime_type: String,
    pub data: Bytes,
}

impl Attachment {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: None,
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}
