use std::collections::HashMap;

use async_trait::async_trait;
use lectern_model::{
    Chapter, ChapterId, ContentBody, ContentItem, ContentKind, Course,
    CourseId, CourseSummary, DEFAULT_FONT_SIZE, MediaContent, QuizDocument,
    Subchapter, SubchapterId, TextContent,
};
use serde_json::Value;
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow, types::Json};
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::ports::course_trees::CourseTreeRepository,
    error::{LecternError, Result},
};

#[derive(Clone, Debug)]
pub struct PostgresCourseTreeRepository {
    pool: PgPool,
}

impl PostgresCourseTreeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> LecternError {
    move |e| LecternError::Database(format!("Failed to {context}: {e}"))
}

/// Column values for one `content_items` row. Columns outside the item's
/// field group are written as NULL so a kind switch leaves no stale data.
#[derive(Default)]
struct ItemColumns<'a> {
    text_body: Option<&'a str>,
    font_size: Option<i32>,
    bold: Option<bool>,
    italic: Option<bool>,
    underline: Option<bool>,
    color: Option<&'a str>,
    media_mime: Option<&'a str>,
    media_file_name: Option<&'a str>,
    media_data: Option<&'a [u8]>,
    quiz: Option<Json<&'a Value>>,
}

impl<'a> ItemColumns<'a> {
    fn from_body(body: &'a ContentBody) -> Self {
        match body {
            ContentBody::Text(text) => Self {
                text_body: Some(&text.body),
                font_size: Some(text.font_size),
                bold: Some(text.bold),
                italic: Some(text.italic),
                underline: Some(text.underline),
                color: text.color.as_deref(),
                ..Default::default()
            },
            ContentBody::Image(media) | ContentBody::Video(media) => Self {
                media_mime: Some(&media.mime_type),
                media_file_name: media.file_name.as_deref(),
                media_data: Some(&media.data),
                ..Default::default()
            },
            ContentBody::Quiz { document } => Self {
                quiz: Some(Json(document.as_value())),
                ..Default::default()
            },
        }
    }
}

fn decode_item(row: &PgRow) -> Result<ContentItem> {
    let id: Uuid = row.try_get("id")?;
    let content_type: String = row.try_get("content_type")?;
    let kind: ContentKind = content_type.parse().map_err(|e| {
        LecternError::Database(format!("content item {id}: {e}"))
    })?;

    let content = match kind {
        ContentKind::Text => ContentBody::Text(TextContent {
            body: row
                .try_get::<Option<String>, _>("text_body")?
                .unwrap_or_default(),
            font_size: row
                .try_get::<Option<i32>, _>("font_size")?
                .unwrap_or(DEFAULT_FONT_SIZE),
            bold: row.try_get::<Option<bool>, _>("bold")?.unwrap_or(false),
            italic: row.try_get::<Option<bool>, _>("italic")?.unwrap_or(false),
            underline: row
                .try_get::<Option<bool>, _>("underline")?
                .unwrap_or(false),
            color: row.try_get("color")?,
        }),
        ContentKind::Image | ContentKind::Video => {
            let media = MediaContent {
                mime_type: row
                    .try_get::<Option<String>, _>("media_mime")?
                    .unwrap_or_default(),
                file_name: row.try_get("media_file_name")?,
                data: row
                    .try_get::<Option<Vec<u8>>, _>("media_data")?
                    .unwrap_or_default(),
            };
            if kind == ContentKind::Image {
                ContentBody::Image(media)
            } else {
                ContentBody::Video(media)
            }
        }
        ContentKind::Quiz => {
            let Json(value) = row
                .try_get::<Option<Json<Value>>, _>("quiz")?
                .ok_or_else(|| {
                    LecternError::Database(format!(
                        "quiz item {id} has no document"
                    ))
                })?;
            ContentBody::Quiz {
                document: QuizDocument::from_canonical(value),
            }
        }
    };

    Ok(ContentItem {
        id: id.into(),
        subchapter_id: row.try_get::<Uuid, _>("subchapter_id")?.into(),
        order: row.try_get("position")?,
        content,
    })
}

/// Delete rows missing from `course` and upsert every node it contains.
async fn write_children(
    tx: &mut Transaction<'_, Postgres>,
    course: &Course,
) -> Result<()> {
    let chapter_ids: Vec<Uuid> =
        course.chapters.iter().map(|c| c.id.to_uuid()).collect();
    let subchapter_ids: Vec<Uuid> =
        course.subchapters().map(|s| s.id.to_uuid()).collect();
    let item_ids: Vec<Uuid> = course.items().map(|i| i.id.to_uuid()).collect();

    // Parents first: cascades take care of the dropped subtrees.
    let removed_chapters = sqlx::query(
        "DELETE FROM chapters WHERE course_id = $1 AND NOT (id = ANY($2))",
    )
    .bind(course.id.to_uuid())
    .bind(&chapter_ids)
    .execute(&mut **tx)
    .await
    .map_err(db_error("delete chapters"))?;

    let removed_subchapters = sqlx::query(
        "DELETE FROM subchapters WHERE chapter_id = ANY($1) AND NOT (id = ANY($2))",
    )
    .bind(&chapter_ids)
    .bind(&subchapter_ids)
    .execute(&mut **tx)
    .await
    .map_err(db_error("delete subchapters"))?;

    let removed_items = sqlx::query(
        "DELETE FROM content_items WHERE subchapter_id = ANY($1) AND NOT (id = ANY($2))",
    )
    .bind(&subchapter_ids)
    .bind(&item_ids)
    .execute(&mut **tx)
    .await
    .map_err(db_error("delete content items"))?;

    debug!(
        course_id = %course.id,
        chapters = removed_chapters.rows_affected(),
        subchapters = removed_subchapters.rows_affected(),
        items = removed_items.rows_affected(),
        "pruned course tree rows"
    );

    for chapter in &course.chapters {
        sqlx::query(
            r#"
            INSERT INTO chapters (id, course_id, position, name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                position = EXCLUDED.position,
                name = EXCLUDED.name
            "#,
        )
        .bind(chapter.id.to_uuid())
        .bind(course.id.to_uuid())
        .bind(chapter.order)
        .bind(&chapter.name)
        .execute(&mut **tx)
        .await
        .map_err(db_error("upsert chapter"))?;

        for subchapter in &chapter.subchapters {
            sqlx::query(
                r#"
                INSERT INTO subchapters (id, chapter_id, position, name)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id) DO UPDATE SET
                    position = EXCLUDED.position,
                    name = EXCLUDED.name
                "#,
            )
            .bind(subchapter.id.to_uuid())
            .bind(chapter.id.to_uuid())
            .bind(subchapter.order)
            .bind(&subchapter.name)
            .execute(&mut **tx)
            .await
            .map_err(db_error("upsert subchapter"))?;

            for item in &subchapter.items {
                upsert_item(tx, subchapter.id, item).await?;
            }
        }
    }

    Ok(())
}

async fn upsert_item(
    tx: &mut Transaction<'_, Postgres>,
    subchapter_id: SubchapterId,
    item: &ContentItem,
) -> Result<()> {
    let columns = ItemColumns::from_body(&item.content);

    sqlx::query(
        r#"
        INSERT INTO content_items (
            id, subchapter_id, position, content_type,
            text_body, font_size, bold, italic, underline, color,
            media_mime, media_file_name, media_data, quiz
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        ON CONFLICT (id) DO UPDATE SET
            position = EXCLUDED.position,
            content_type = EXCLUDED.content_type,
            text_body = EXCLUDED.text_body,
            font_size = EXCLUDED.font_size,
            bold = EXCLUDED.bold,
            italic = EXCLUDED.italic,
            underline = EXCLUDED.underline,
            color = EXCLUDED.color,
            media_mime = EXCLUDED.media_mime,
            media_file_name = EXCLUDED.media_file_name,
            media_data = EXCLUDED.media_data,
            quiz = EXCLUDED.quiz
        "#,
    )
    .bind(item.id.to_uuid())
    .bind(subchapter_id.to_uuid())
    .bind(item.order)
    .bind(item.kind().as_str())
    .bind(columns.text_body)
    .bind(columns.font_size)
    .bind(columns.bold)
    .bind(columns.italic)
    .bind(columns.underline)
    .bind(columns.color)
    .bind(columns.media_mime)
    .bind(columns.media_file_name)
    .bind(columns.media_data)
    .bind(columns.quiz)
    .execute(&mut **tx)
    .await
    .map_err(db_error("upsert content item"))?;

    Ok(())
}

#[async_trait]
impl CourseTreeRepository for PostgresCourseTreeRepository {
    async fn load_course_tree(
        &self,
        course_id: CourseId,
    ) -> Result<Option<Course>> {
        let Some(row) = sqlx::query(
            r#"
            SELECT id, name, description, price, review, review_number
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(course_id.to_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("load course"))?
        else {
            return Ok(None);
        };

        let mut course = Course {
            id: course_id,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            review: row.try_get("review")?,
            review_number: row.try_get("review_number")?,
            chapters: Vec::new(),
        };

        let chapter_rows = sqlx::query(
            r#"
            SELECT id, position, name, review, review_number
            FROM chapters
            WHERE course_id = $1
            ORDER BY position, id
            "#,
        )
        .bind(course_id.to_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load chapters"))?;

        for row in &chapter_rows {
            course.chapters.push(Chapter {
                id: row.try_get::<Uuid, _>("id")?.into(),
                course_id,
                order: row.try_get("position")?,
                name: row.try_get("name")?,
                review: row.try_get("review")?,
                review_number: row.try_get("review_number")?,
                subchapters: Vec::new(),
            });
        }
        if course.chapters.is_empty() {
            return Ok(Some(course));
        }

        let chapter_ids: Vec<Uuid> =
            course.chapters.iter().map(|c| c.id.to_uuid()).collect();
        let subchapter_rows = sqlx::query(
            r#"
            SELECT id, chapter_id, position, name
            FROM subchapters
            WHERE chapter_id = ANY($1)
            ORDER BY position, id
            "#,
        )
        .bind(&chapter_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load subchapters"))?;

        let mut subchapters: HashMap<ChapterId, Vec<Subchapter>> =
            HashMap::new();
        let mut subchapter_ids = Vec::with_capacity(subchapter_rows.len());
        for row in &subchapter_rows {
            let subchapter = Subchapter {
                id: row.try_get::<Uuid, _>("id")?.into(),
                chapter_id: row.try_get::<Uuid, _>("chapter_id")?.into(),
                order: row.try_get("position")?,
                name: row.try_get("name")?,
                items: Vec::new(),
            };
            subchapter_ids.push(subchapter.id.to_uuid());
            subchapters
                .entry(subchapter.chapter_id)
                .or_default()
                .push(subchapter);
        }

        let item_rows = sqlx::query(
            r#"
            SELECT id, subchapter_id, position, content_type,
                   text_body, font_size, bold, italic, underline, color,
                   media_mime, media_file_name, media_data, quiz
            FROM content_items
            WHERE subchapter_id = ANY($1)
            ORDER BY position, id
            "#,
        )
        .bind(&subchapter_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load content items"))?;

        let mut items: HashMap<SubchapterId, Vec<ContentItem>> = HashMap::new();
        for row in &item_rows {
            let item = decode_item(row)?;
            items.entry(item.subchapter_id).or_default().push(item);
        }

        for chapter in &mut course.chapters {
            chapter.subchapters =
                subchapters.remove(&chapter.id).unwrap_or_default();
            for subchapter in &mut chapter.subchapters {
                subchapter.items =
                    items.remove(&subchapter.id).unwrap_or_default();
            }
        }

        Ok(Some(course))
    }

    async fn save_course_tree(&self, course: &Course) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin transaction"))?;

        let updated = sqlx::query(
            r#"
            UPDATE courses
            SET name = $2, description = $3, price = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(course.id.to_uuid())
        .bind(&course.name)
        .bind(&course.description)
        .bind(course.price)
        .execute(&mut *tx)
        .await
        .map_err(db_error("update course"))?;

        if updated.rows_affected() == 0 {
            return Err(LecternError::NotFound(format!("course {}", course.id)));
        }

        write_children(&mut tx, course).await?;
        tx.commit().await.map_err(db_error("commit course tree"))?;
        Ok(())
    }

    async fn create_course(&self, course: &Course) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO courses (id, name, description, price, review, review_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(course.id.to_uuid())
        .bind(&course.name)
        .bind(&course.description)
        .bind(course.price)
        .bind(course.review)
        .bind(course.review_number)
        .execute(&mut *tx)
        .await
        .map_err(db_error("create course"))?;

        write_children(&mut tx, course).await?;
        tx.commit().await.map_err(db_error("commit new course"))?;
        Ok(())
    }

    async fn list_courses(&self) -> Result<Vec<CourseSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.name, c.description, c.price, c.review,
                   c.review_number, COUNT(ch.id) AS chapter_count
            FROM courses c
            LEFT JOIN chapters ch ON ch.course_id = c.id
            GROUP BY c.id
            ORDER BY c.name, c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list courses"))?;

        rows.iter()
            .map(|row| -> Result<CourseSummary> {
                let chapter_count: i64 = row.try_get("chapter_count")?;
                Ok(CourseSummary {
                    id: row.try_get::<Uuid, _>("id")?.into(),
                    name: row.try_get("name")?,
                    description: row.try_get("description")?,
                    price: row.try_get("price")?,
                    review: row.try_get("review")?,
                    review_number: row.try_get("review_number")?,
                    chapter_count: usize::try_from(chapter_count)
                        .unwrap_or_default(),
                })
            })
            .collect()
    }
}
