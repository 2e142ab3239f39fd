//! Shared fixtures for the content tree integration tests.
#![allow(dead_code)]

use lectern_core::domain::content_tree::TreeSynchronizer;
use lectern_model::{
    Attachment, ChapterId, ChapterUpdate, ContentItemId, ContentItemUpdate,
    Course, CourseUpdate, FieldPatch, SubchapterId, SubchapterUpdate,
};
use serde_json::{Value, json};

pub fn png(tag: &str) -> Attachment {
    Attachment::new("image/png", tag.as_bytes().to_vec())
        .with_file_name(format!("{tag}.png"))
}

pub fn mp4(tag: &str) -> Attachment {
    Attachment::new("video/mp4", tag.as_bytes().to_vec())
        .with_file_name(format!("{tag}.mp4"))
}

pub fn new_chapter(
    name: &str,
    subchapters: Vec<SubchapterUpdate>,
) -> ChapterUpdate {
    ChapterUpdate {
        name: FieldPatch::Set(name.into()),
        subchapters: Some(subchapters),
        ..Default::default()
    }
}

pub fn new_subchapter(
    name: &str,
    items: Vec<ContentItemUpdate>,
) -> SubchapterUpdate {
    SubchapterUpdate {
        name: FieldPatch::Set(name.into()),
        items: Some(items),
        ..Default::default()
    }
}

pub fn new_text(body: &str) -> ContentItemUpdate {
    ContentItemUpdate {
        content_type: FieldPatch::Set("text".into()),
        body: FieldPatch::Set(body.into()),
        ..Default::default()
    }
}

pub fn new_media(kind: &str) -> ContentItemUpdate {
    ContentItemUpdate {
        content_type: FieldPatch::Set(kind.into()),
        ..Default::default()
    }
}

pub fn new_quiz(raw: Value) -> ContentItemUpdate {
    ContentItemUpdate {
        content_type: FieldPatch::Set("quiz".into()),
        quiz: FieldPatch::Set(raw),
        ..Default::default()
    }
}

pub fn edit_chapter(id: ChapterId) -> ChapterUpdate {
    ChapterUpdate {
        id: Some(id),
        ..Default::default()
    }
}

pub fn edit_subchapter(id: SubchapterId) -> SubchapterUpdate {
    SubchapterUpdate {
        id: Some(id),
        ..Default::default()
    }
}

pub fn edit_item(id: ContentItemId) -> ContentItemUpdate {
    ContentItemUpdate {
        id: Some(id),
        ..Default::default()
    }
}

/// Descriptor touching only the items of one existing subchapter.
pub fn items_of(
    chapter: ChapterId,
    subchapter: SubchapterId,
    items: Vec<ContentItemUpdate>,
) -> CourseUpdate {
    CourseUpdate {
        chapters: Some(vec![ChapterUpdate {
            subchapters: Some(vec![SubchapterUpdate {
                items: Some(items),
                ..edit_subchapter(subchapter)
            }]),
            ..edit_chapter(chapter)
        }]),
        ..Default::default()
    }
}

/// A course built through the synchronizer itself:
///
/// - "Ownership": "Borrowing" (text, image, quiz), "Lifetimes" (empty)
/// - "Traits": "Generics" (video)
pub fn seeded_course() -> Course {
    let empty = Course::new("Rust");
    let update = CourseUpdate {
        description: FieldPatch::Set("Systems programming".into()),
        price: FieldPatch::Set(120),
        chapters: Some(vec![
            new_chapter(
                "Ownership",
                vec![
                    new_subchapter(
                        "Borrowing",
                        vec![
                            new_text("Shared and mutable references"),
                            new_media("image"),
                            new_quiz(json!([{"q": "Can two &mut coexist?"}])),
                        ],
                    ),
                    new_subchapter("Lifetimes", vec![]),
                ],
            ),
            new_chapter(
                "Traits",
                vec![new_subchapter("Generics", vec![new_media("video")])],
            ),
        ]),
        ..Default::default()
    };

    TreeSynchronizer::default()
        .synchronize(&empty, &update, vec![png("diagram"), mp4("lecture")])
        .expect("seed descriptor applies")
        .course
}
