//! Correlates the flat, ordered upload list with the content items that need
//! a binary payload.
//!
//! Creations consume attachments strictly in traversal order. Updates only
//! consume one when the descriptor sets `updateAttachment`, and the index they
//! took is remembered so repeated lookups for the same item within one
//! request hand back the same file.

use std::collections::HashMap;

use lectern_model::{Attachment, ContentItemId, ContentKind};
use tracing::trace;

use super::{NodeValidator, SyncError};

#[derive(Debug)]
pub struct AttachmentCursor<'v> {
    attachments: Vec<Attachment>,
    next: usize,
    consumed_for_update: HashMap<ContentItemId, usize>,
    validator: &'v NodeValidator,
}

impl<'v> AttachmentCursor<'v> {
    pub fn new(attachments: Vec<Attachment>, validator: &'v NodeValidator) -> Self {
        Self {
            attachments,
            next: 0,
            consumed_for_update: HashMap::new(),
            validator,
        }
    }

    /// Take the next unused attachment for a newly created media item.
    pub fn next_for_create(
        &mut self,
        kind: ContentKind,
    ) -> Result<Attachment, SyncError> {
        let index = self.advance(kind)?;
        Ok(self.attachments[index].clone())
    }

    /// Resolve the attachment for an existing item.
    ///
    /// Returns `Ok(None)` when the update did not ask for a new file.
    pub fn for_update(
        &mut self,
        item_id: ContentItemId,
        kind: ContentKind,
        requested: bool,
    ) -> Result<Option<Attachment>, SyncError> {
        if !requested {
            return Ok(None);
        }

        if let Some(&index) = self.consumed_for_update.get(&item_id) {
            return Ok(Some(self.attachments[index].clone()));
        }

        let index = self.advance(kind)?;
        self.consumed_for_update.insert(item_id, index);
        Ok(Some(self.attachments[index].clone()))
    }

    /// Index of the next attachment that would be consumed.
    pub fn position(&self) -> usize {
        self.next
    }

    /// Attachments left unconsumed so far.
    pub fn remaining(&self) -> usize {
        self.attachments.len().saturating_sub(self.next)
    }

    fn advance(&mut self, kind: ContentKind) -> Result<usize, SyncError> {
        let index = self.next;
        let attachment = self.attachments.get(index).ok_or(
            SyncError::MissingAttachment {
                kind,
                position: index,
            },
        )?;

        self.validator.check(attachment)?;
        trace!(
            position = index,
            %kind,
            mime = %attachment.mime_type,
            bytes = attachment.len(),
            "attachment consumed"
        );

        self.next += 1;
        Ok(index)
    }
}
