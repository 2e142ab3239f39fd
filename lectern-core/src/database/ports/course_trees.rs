use async_trait::async_trait;
use lectern_model::{Course, CourseId, CourseSummary};

use crate::error::Result;

/// Persistence collaborator for whole course content trees.
///
/// `save_course_tree` is the single write of an authoring request. Adapters
/// must apply it all-or-nothing: after it returns, the stored subtree equals
/// the given tree (nodes missing from it are removed together with their
/// descendants), and on error nothing changed. Review aggregates on courses
/// and chapters belong to the review subsystem and are never overwritten here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseTreeRepository: Send + Sync {
    /// Load a course with all descendants, siblings sorted by `(order, id)`.
    async fn load_course_tree(&self, course_id: CourseId)
    -> Result<Option<Course>>;

    async fn save_course_tree(&self, course: &Course) -> Result<()>;

    async fn create_course(&self, course: &Course) -> Result<()>;

    async fn list_courses(&self) -> Result<Vec<CourseSummary>>;
}
