//! Update-descriptor view of a persisted tree.
//!
//! Every node keeps its id and every editable field is `Set`, while media
//! items never request a new attachment. Feeding the export straight back to
//! the synchronizer with no attachments reproduces the same tree.

use lectern_model::{
    Chapter, ChapterUpdate, ContentBody, ContentItem, ContentItemUpdate, Course,
    CourseUpdate, FieldPatch, Subchapter, SubchapterUpdate,
};
use serde_json::Value;

pub fn export_descriptor(course: &Course) -> CourseUpdate {
    CourseUpdate {
        name: FieldPatch::Set(course.name.clone()),
        description: FieldPatch::Set(course.description.clone()),
        price: FieldPatch::Set(course.price),
        chapters: Some(course.chapters.iter().map(export_chapter).collect()),
    }
}

fn export_chapter(chapter: &Chapter) -> ChapterUpdate {
    ChapterUpdate {
        id: Some(chapter.id),
        deleted: None,
        order: FieldPatch::Set(chapter.order),
        name: FieldPatch::Set(chapter.name.clone()),
        subchapters: Some(
            chapter.subchapters.iter().map(export_subchapter).collect(),
        ),
    }
}

fn export_subchapter(subchapter: &Subchapter) -> SubchapterUpdate {
    SubchapterUpdate {
        id: Some(subchapter.id),
        deleted: None,
        order: FieldPatch::Set(subchapter.order),
        name: FieldPatch::Set(subchapter.name.clone()),
        items: Some(subchapter.items.iter().map(export_item).collect()),
    }
}

fn export_item(item: &ContentItem) -> ContentItemUpdate {
    let mut update = ContentItemUpdate {
        id: Some(item.id),
        order: FieldPatch::Set(item.order),
        content_type: FieldPatch::Set(item.kind().as_str().to_string()),
        ..Default::default()
    };

    match &item.content {
        ContentBody::Text(text) => {
            update.body = FieldPatch::Set(text.body.clone());
            update.font_size = FieldPatch::Set(text.font_size);
            update.bold = FieldPatch::Set(text.bold);
            update.italic = FieldPatch::Set(text.italic);
            update.underline = FieldPatch::Set(text.underline);
            update.color = FieldPatch::Set(text.color.clone());
        }
        ContentBody::Quiz { document } => {
            update.quiz = FieldPatch::Set(Value::clone(document.as_value()));
        }
        ContentBody::Image(_) | ContentBody::Video(_) => {}
    }

    update
}
