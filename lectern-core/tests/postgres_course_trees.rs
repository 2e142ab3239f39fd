//! Postgres adapter round trips. Needs a reachable `DATABASE_URL`.

use anyhow::Result;
use lectern_core::database::{
    infrastructure::postgres::PostgresCourseTreeRepository,
    ports::course_trees::CourseTreeRepository,
};
use lectern_core::domain::content_tree::TreeSynchronizer;
use lectern_model::{ChapterUpdate, CourseUpdate, FieldPatch};
use sqlx::PgPool;

#[path = "support/mod.rs"]
mod support;

use support::{edit_chapter, seeded_course};

#[sqlx::test(migrator = "lectern_core::MIGRATOR")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn stored_tree_loads_back_identically(pool: PgPool) -> Result<()> {
    let repo = PostgresCourseTreeRepository::new(pool);
    let course = seeded_course();

    repo.create_course(&course).await?;
    let loaded = repo.load_course_tree(course.id).await?.expect("course");
    assert_eq!(loaded, course);

    let summaries = repo.list_courses().await?;
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].chapter_count, 2);
    Ok(())
}

#[sqlx::test(migrator = "lectern_core::MIGRATOR")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn save_prunes_deleted_subtrees(pool: PgPool) -> Result<()> {
    let repo = PostgresCourseTreeRepository::new(pool.clone());
    let course = seeded_course();
    repo.create_course(&course).await?;

    let doomed = course.chapters[0].clone();
    let update = CourseUpdate {
        name: FieldPatch::Set("Rust, abridged".into()),
        chapters: Some(vec![ChapterUpdate {
            deleted: Some(true),
            ..edit_chapter(doomed.id)
        }]),
        ..Default::default()
    };
    let outcome =
        TreeSynchronizer::default().synchronize(&course, &update, vec![])?;
    repo.save_course_tree(&outcome.course).await?;

    let loaded = repo.load_course_tree(course.id).await?.expect("course");
    assert_eq!(loaded, outcome.course);

    let orphans: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM content_items WHERE subchapter_id = ANY($1)",
    )
    .bind(
        doomed
            .subchapters
            .iter()
            .map(|s| s.id.to_uuid())
            .collect::<Vec<_>>(),
    )
    .fetch_one(&pool)
    .await?;
    assert_eq!(orphans, 0);
    Ok(())
}
