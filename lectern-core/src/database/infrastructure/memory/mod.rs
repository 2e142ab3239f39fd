//! Process-local adapter used in development mode and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use lectern_model::{Course, CourseId, CourseSummary};
use tokio::sync::RwLock;

use crate::{
    database::ports::course_trees::CourseTreeRepository,
    error::{LecternError, Result},
};

#[derive(Debug, Default)]
pub struct InMemoryCourseTreeRepository {
    courses: RwLock<HashMap<CourseId, Course>>,
}

impl InMemoryCourseTreeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        let courses = courses
            .into_iter()
            .map(|course| (course.id, course))
            .collect();
        Self {
            courses: RwLock::new(courses),
        }
    }
}

/// Carry review aggregates over from the stored tree; authoring never
/// writes them.
fn keep_review_fields(stored: &Course, incoming: &mut Course) {
    incoming.review = stored.review;
    incoming.review_number = stored.review_number;
    for chapter in &mut incoming.chapters {
        match stored.chapter(chapter.id) {
            Some(previous) => {
                chapter.review = previous.review;
                chapter.review_number = previous.review_number;
            }
            None => {
                chapter.review = 0.0;
                chapter.review_number = 0;
            }
        }
    }
}

#[async_trait]
impl CourseTreeRepository for InMemoryCourseTreeRepository {
    async fn load_course_tree(
        &self,
        course_id: CourseId,
    ) -> Result<Option<Course>> {
        Ok(self.courses.read().await.get(&course_id).cloned())
    }

    async fn save_course_tree(&self, course: &Course) -> Result<()> {
        let mut courses = self.courses.write().await;
        let stored = courses.get_mut(&course.id).ok_or_else(|| {
            LecternError::NotFound(format!("course {}", course.id))
        })?;

        let mut incoming = course.clone();
        keep_review_fields(stored, &mut incoming);
        *stored = incoming;
        Ok(())
    }

    async fn create_course(&self, course: &Course) -> Result<()> {
        let mut courses = self.courses.write().await;
        if courses.contains_key(&course.id) {
            return Err(LecternError::Database(format!(
                "course {} already exists",
                course.id
            )));
        }
        courses.insert(course.id, course.clone());
        Ok(())
    }

    async fn list_courses(&self) -> Result<Vec<CourseSummary>> {
        let courses = self.courses.read().await;
        let mut summaries: Vec<CourseSummary> =
            courses.values().map(CourseSummary::from).collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_model::Chapter;

    #[tokio::test]
    async fn test_save_keeps_review_aggregates() {
        let mut course = Course::new("Rust");
        course.review = 4.5;
        course.review_number = 10;
        let mut chapter = Chapter::new(course.id, 0, "Intro");
        chapter.review = 3.0;
        chapter.review_number = 2;
        course.chapters.push(chapter);
        let repo = InMemoryCourseTreeRepository::with_courses([course.clone()]);

        let mut edited = course.clone();
        edited.name = "Rust 2".into();
        edited.review = 0.0;
        edited.chapters[0].review_number = 0;
        repo.save_course_tree(&edited).await.unwrap();

        let stored = repo.load_course_tree(course.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Rust 2");
        assert_eq!(stored.review, 4.5);
        assert_eq!(stored.chapters[0].review_number, 2);
    }

    #[tokio::test]
    async fn test_save_unknown_course_fails() {
        let repo = InMemoryCourseTreeRepository::new();
        let err = repo
            .save_course_tree(&Course::new("Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, LecternError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let repo = InMemoryCourseTreeRepository::new();
        repo.create_course(&Course::new("Zig")).await.unwrap();
        repo.create_course(&Course::new("Ada")).await.unwrap();

        let names: Vec<String> = repo
            .list_courses()
            .await
            .unwrap()
            .into_iter()
            .map(|summary| summary.name)
            .collect();
        assert_eq!(names, vec!["Ada", "Zig"]);
    }
}
