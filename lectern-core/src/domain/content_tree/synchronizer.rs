//! Reconciles a partial [`CourseUpdate`] against a persisted [`Course`].
//!
//! Every level below the course runs the same three passes over the
//! submitted child list, in fixed order:
//!
//! 1. deletion: entries with an id and `deleted = true` drop the matching
//!    child and its whole subtree. Ids that match nothing are skipped.
//! 2. update: remaining entries with an id patch the matching child, failing
//!    with [`SyncError::NodeNotFound`] when it does not exist, and recurse
//!    into nested child lists.
//! 3. creation: entries without an id allocate a new child (append order
//!    unless `order` is given) and recurse against an empty child list.
//!
//! Siblings are then sorted by `(order, id)`. Orders are never renumbered.
//!
//! The walk runs on a private copy of the input tree, so an error at any depth
//! leaves the caller's tree untouched and nothing is handed to persistence.

use lectern_model::{
    Attachment, Chapter, ChapterId, ChapterUpdate, ContentBody, ContentItem,
    ContentItemId, ContentItemUpdate, ContentKind, Course, CourseId,
    CourseUpdate, FieldPatch, MediaContent, NodeLevel, NodeUpdate, Subchapter,
    SubchapterId, SubchapterUpdate, TextContent, TreeNode, sort_siblings,
};
use tracing::{debug, instrument};

use super::{
    AttachmentCursor, LevelCounts, NodeValidator, SyncError, SyncOutcome,
    SyncReport, quiz,
};

#[derive(Debug, Clone, Default)]
pub struct TreeSynchronizer {
    validator: NodeValidator,
}

impl TreeSynchronizer {
    pub fn new(validator: NodeValidator) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &NodeValidator {
        &self.validator
    }

    /// Apply `update` to a copy of `existing`, binding `attachments` to media
    /// items in traversal order.
    #[instrument(
        level = "debug",
        skip_all,
        fields(course_id = %existing.id, attachments = attachments.len())
    )]
    pub fn synchronize(
        &self,
        existing: &Course,
        update: &CourseUpdate,
        attachments: Vec<Attachment>,
    ) -> Result<SyncOutcome, SyncError> {
        let mut course = existing.clone();
        let mut ctx = SyncContext {
            cursor: AttachmentCursor::new(attachments, &self.validator),
            validator: &self.validator,
            report: SyncReport::default(),
        };

        apply_course_fields(&mut course, update, &mut ctx)?;
        if let Some(chapters) = &update.chapters {
            sync_children::<ChapterLevel>(
                course.id,
                &mut course.chapters,
                chapters,
                &mut ctx,
            )?;
        }

        let mut report = ctx.report;
        report.attachments_consumed = ctx.cursor.position();
        report.attachments_unused = ctx.cursor.remaining();
        if report.attachments_unused > 0 {
            debug!(
                unused = report.attachments_unused,
                "attachments left over after synchronization"
            );
        }

        Ok(SyncOutcome { course, report })
    }
}

struct SyncContext<'a> {
    cursor: AttachmentCursor<'a>,
    validator: &'a NodeValidator,
    report: SyncReport,
}

impl SyncContext<'_> {
    fn record(&mut self, level: NodeLevel, f: impl FnOnce(&mut LevelCounts)) {
        if let Some(counts) = self.report.counts_mut(level) {
            f(counts);
        }
    }
}

/// One nesting level of the tree, as seen by the generic pass loop.
trait SyncLevel {
    type Node: TreeNode;
    type Update: NodeUpdate<Id = <Self::Node as TreeNode>::Id>;
    type ParentId: Copy;

    const LEVEL: NodeLevel;

    fn apply(
        node: &mut Self::Node,
        update: &Self::Update,
        ctx: &mut SyncContext<'_>,
    ) -> Result<(), SyncError>;

    fn create(
        parent: Self::ParentId,
        order: i32,
        update: &Self::Update,
        ctx: &mut SyncContext<'_>,
    ) -> Result<Self::Node, SyncError>;
}

fn sync_children<L: SyncLevel>(
    parent: L::ParentId,
    children: &mut Vec<L::Node>,
    updates: &[L::Update],
    ctx: &mut SyncContext<'_>,
) -> Result<(), SyncError> {
    for update in updates.iter().filter(|update| update.is_deleted()) {
        let Some(id) = update.id() else {
            continue;
        };

        let before = children.len();
        children.retain(|child| child.id() != id);
        if children.len() < before {
            ctx.record(L::LEVEL, |counts| counts.deleted += 1);
        } else {
            ctx.report.skipped_deletions += 1;
            debug!(level = %L::LEVEL, id = ?id, "deletion target already absent");
        }
    }

    for update in updates.iter().filter(|update| !update.is_deleted()) {
        let Some(id) = update.id() else {
            continue;
        };

        let node = children
            .iter_mut()
            .find(|child| child.id() == id)
            .ok_or_else(|| SyncError::not_found(L::LEVEL, id))?;
        L::apply(node, update, ctx)?;
        ctx.record(L::LEVEL, |counts| counts.updated += 1);
    }

    for update in updates.iter().filter(|update| update.id().is_none()) {
        if update.is_deleted() {
            debug!(level = %L::LEVEL, "ignoring deleted flag on unsaved node");
            continue;
        }

        let order = update
            .order()
            .get()
            .copied()
            .unwrap_or(children.len() as i32);
        let node = L::create(parent, order, update, ctx)?;
        children.push(node);
        ctx.record(L::LEVEL, |counts| counts.created += 1);
    }

    sort_siblings(children);
    Ok(())
}

fn apply_course_fields(
    course: &mut Course,
    update: &CourseUpdate,
    ctx: &mut SyncContext<'_>,
) -> Result<(), SyncError> {
    if let Some(price) = update.price.get() {
        ctx.validator.validate_price(*price)?;
    }
    if let Some(name) = update.name.get() {
        course.name = ctx.validator.validate_name(name)?;
    }
    update.description.apply_to(&mut course.description);
    update.price.apply_to(&mut course.price);
    Ok(())
}

fn required_name(
    level: NodeLevel,
    name: &FieldPatch<String>,
    validator: &NodeValidator,
) -> Result<String, SyncError> {
    let name = name.get().ok_or_else(|| {
        SyncError::invalid_field("name", format!("required for a new {level}"))
    })?;
    validator.validate_name(name)
}

fn patch_name(
    name: &FieldPatch<String>,
    target: &mut String,
    validator: &NodeValidator,
) -> Result<(), SyncError> {
    if let Some(name) = name.get() {
        *target = validator.validate_name(name)?;
    }
    Ok(())
}

struct ChapterLevel;

impl SyncLevel for ChapterLevel {
    type Node = Chapter;
    type Update = ChapterUpdate;
    type ParentId = CourseId;

    const LEVEL: NodeLevel = NodeLevel::Chapter;

    fn apply(
        node: &mut Chapter,
        update: &ChapterUpdate,
        ctx: &mut SyncContext<'_>,
    ) -> Result<(), SyncError> {
        update.order.apply_to(&mut node.order);
        patch_name(&update.name, &mut node.name, ctx.validator)?;
        if let Some(subchapters) = &update.subchapters {
            sync_children::<SubchapterLevel>(
                node.id,
                &mut node.subchapters,
                subchapters,
                ctx,
            )?;
        }
        Ok(())
    }

    fn create(
        course_id: CourseId,
        order: i32,
        update: &ChapterUpdate,
        ctx: &mut SyncContext<'_>,
    ) -> Result<Chapter, SyncError> {
        let name = required_name(Self::LEVEL, &update.name, ctx.validator)?;
        let mut chapter = Chapter::new(course_id, order, name);
        if let Some(subchapters) = &update.subchapters {
            sync_children::<SubchapterLevel>(
                chapter.id,
                &mut chapter.subchapters,
                subchapters,
                ctx,
            )?;
        }
        Ok(chapter)
    }
}

struct SubchapterLevel;

impl SyncLevel for SubchapterLevel {
    type Node = Subchapter;
    type Update = SubchapterUpdate;
    type ParentId = ChapterId;

    const LEVEL: NodeLevel = NodeLevel::Subchapter;

    fn apply(
        node: &mut Subchapter,
        update: &SubchapterUpdate,
        ctx: &mut SyncContext<'_>,
    ) -> Result<(), SyncError> {
        update.order.apply_to(&mut node.order);
        patch_name(&update.name, &mut node.name, ctx.validator)?;
        if let Some(items) = &update.items {
            sync_children::<ContentItemLevel>(
                node.id,
                &mut node.items,
                items,
                ctx,
            )?;
        }
        Ok(())
    }

    fn create(
        chapter_id: ChapterId,
        order: i32,
        update: &SubchapterUpdate,
        ctx: &mut SyncContext<'_>,
    ) -> Result<Subchapter, SyncError> {
        let name = required_name(Self::LEVEL, &update.name, ctx.validator)?;
        let mut subchapter = Subchapter::new(chapter_id, order, name);
        if let Some(items) = &update.items {
            sync_children::<ContentItemLevel>(
                subchapter.id,
                &mut subchapter.items,
                items,
                ctx,
            )?;
        }
        Ok(subchapter)
    }
}

struct ContentItemLevel;

impl SyncLevel for ContentItemLevel {
    type Node = ContentItem;
    type Update = ContentItemUpdate;
    type ParentId = SubchapterId;

    const LEVEL: NodeLevel = NodeLevel::ContentItem;

    fn apply(
        item: &mut ContentItem,
        update: &ContentItemUpdate,
        ctx: &mut SyncContext<'_>,
    ) -> Result<(), SyncError> {
        update.order.apply_to(&mut item.order);

        let current = item.kind();
        let target = match update.content_type.get() {
            Some(raw) => parse_kind(raw)?,
            None => current,
        };

        if target != current {
            // Switching kinds rebuilds the field group from scratch.
            item.content =
                build_content(target, update, MediaSource::Replace(item.id), ctx)?;
            return Ok(());
        }

        let item_id = item.id;
        match &mut item.content {
            ContentBody::Text(text) => patch_text(text, update, ctx.validator)?,
            ContentBody::Image(media) | ContentBody::Video(media) => {
                if let Some(attachment) = ctx.cursor.for_update(
                    item_id,
                    current,
                    update.update_attachment,
                )? {
                    *media = media_from(attachment);
                }
            }
            ContentBody::Quiz { document } => {
                // Resubmitting the stored document verbatim is a no-op.
                if let Some(raw) = update.quiz.get()
                    && raw != document.as_value()
                {
                    *document = quiz::normalize(raw)?;
                }
            }
        }
        Ok(())
    }

    fn create(
        subchapter_id: SubchapterId,
        order: i32,
        update: &ContentItemUpdate,
        ctx: &mut SyncContext<'_>,
    ) -> Result<ContentItem, SyncError> {
        let kind = match update.content_type.get() {
            Some(raw) => parse_kind(raw)?,
            None => return Err(SyncError::InvalidContentType(String::new())),
        };

        let content = build_content(kind, update, MediaSource::Create, ctx)?;
        Ok(ContentItem {
            id: ContentItemId::new(),
            subchapter_id,
            order,
            content,
        })
    }
}

/// Where a freshly built media field group takes its payload from.
#[derive(Debug, Clone, Copy)]
enum MediaSource {
    Create,
    Replace(ContentItemId),
}

fn parse_kind(raw: &str) -> Result<ContentKind, SyncError> {
    raw.parse::<ContentKind>()
        .map_err(|err| SyncError::InvalidContentType(err.0))
}

fn build_content(
    kind: ContentKind,
    update: &ContentItemUpdate,
    source: MediaSource,
    ctx: &mut SyncContext<'_>,
) -> Result<ContentBody, SyncError> {
    match kind {
        ContentKind::Text => {
            let mut text = TextContent::default();
            patch_text(&mut text, update, ctx.validator)?;
            Ok(ContentBody::Text(text))
        }
        ContentKind::Image | ContentKind::Video => {
            let attachment = match source {
                MediaSource::Create => ctx.cursor.next_for_create(kind)?,
                MediaSource::Replace(item_id) => ctx
                    .cursor
                    .for_update(item_id, kind, update.update_attachment)?
                    .ok_or(SyncError::MissingAttachment {
                        kind,
                        position: ctx.cursor.position(),
                    })?,
            };
            let media = media_from(attachment);
            Ok(match kind {
                ContentKind::Image => ContentBody::Image(media),
                _ => ContentBody::Video(media),
            })
        }
        ContentKind::Quiz => {
            let raw = update.quiz.get().ok_or_else(|| {
                SyncError::InvalidQuizPayload(
                    "quiz content requires a quiz payload".into(),
                )
            })?;
            Ok(ContentBody::Quiz {
                document: quiz::normalize(raw)?,
            })
        }
    }
}

fn patch_text(
    text: &mut TextContent,
    update: &ContentItemUpdate,
    validator: &NodeValidator,
) -> Result<(), SyncError> {
    if let Some(font_size) = update.font_size.get() {
        validator.validate_font_size(*font_size)?;
    }
    update.body.apply_to(&mut text.body);
    update.font_size.apply_to(&mut text.font_size);
    update.bold.apply_to(&mut text.bold);
    update.italic.apply_to(&mut text.italic);
    update.underline.apply_to(&mut text.underline);
    update.color.apply_to(&mut text.color);
    Ok(())
}

fn media_from(attachment: Attachment) -> MediaContent {
    MediaContent {
        mime_type: attachment.mime_type.trim().to_ascii_lowercase(),
        file_name: attachment.file_name,
        data: attachment.data.to_vec(),
    }
}
