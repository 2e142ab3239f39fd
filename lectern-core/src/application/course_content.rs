use std::{fmt, sync::Arc};

use lectern_model::{
    Attachment, Course, CourseId, CourseSummary, CourseUpdate, NewCourse,
    NodeLevel,
};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::{
    application::unit_of_work::AppUnitOfWork,
    domain::content_tree::{
        SyncError, SyncOutcome, SyncReport, TreeSynchronizer, export_descriptor,
    },
    error::Result,
};

/// Persisted tree after a successful edit, with what changed.
#[derive(Debug, Clone, Serialize)]
pub struct EditOutcome {
    pub course: Course,
    pub report: SyncReport,
}

/// A persisted tree together with its update-descriptor form.
#[derive(Debug, Clone, Serialize)]
pub struct ContentSnapshot {
    pub course: Course,
    pub descriptor: CourseUpdate,
}

/// Authoring entry point: load, synchronize, save.
pub struct CourseContentService {
    unit_of_work: Arc<AppUnitOfWork>,
    synchronizer: TreeSynchronizer,
}

impl fmt::Debug for CourseContentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CourseContentService")
            .field("unit_of_work", &self.unit_of_work)
            .field("limits", self.synchronizer.validator().limits())
            .finish()
    }
}

impl CourseContentService {
    pub fn new(
        unit_of_work: Arc<AppUnitOfWork>,
        synchronizer: TreeSynchronizer,
    ) -> Self {
        Self {
            unit_of_work,
            synchronizer,
        }
    }

    async fn load(&self, course_id: CourseId) -> Result<Course> {
        self.unit_of_work
            .course_trees
            .load_course_tree(course_id)
            .await?
            .ok_or_else(|| SyncError::not_found(NodeLevel::Course, course_id).into())
    }

    /// Apply one authoring request to a course. Nothing is written unless the
    /// whole descriptor synchronizes cleanly.
    #[instrument(skip(self, update, attachments), fields(attachments = attachments.len()))]
    pub async fn edit_course_content(
        &self,
        course_id: CourseId,
        update: &CourseUpdate,
        attachments: Vec<Attachment>,
    ) -> Result<EditOutcome> {
        let existing = self.load(course_id).await?;
        let SyncOutcome { course, report } =
            self.synchronizer.synchronize(&existing, update, attachments)?;

        if let Err(err) =
            self.unit_of_work.course_trees.save_course_tree(&course).await
        {
            error!(%course_id, error = %err, "failed to persist course tree");
            return Err(err);
        }

        info!(
            %course_id,
            chapters_created = report.chapters.created,
            chapters_updated = report.chapters.updated,
            chapters_deleted = report.chapters.deleted,
            subchapters_created = report.subchapters.created,
            subchapters_updated = report.subchapters.updated,
            subchapters_deleted = report.subchapters.deleted,
            items_created = report.items.created,
            items_updated = report.items.updated,
            items_deleted = report.items.deleted,
            attachments_consumed = report.attachments_consumed,
            "course content updated"
        );

        Ok(EditOutcome { course, report })
    }

    pub async fn content_snapshot(
        &self,
        course_id: CourseId,
    ) -> Result<ContentSnapshot> {
        let course = self.load(course_id).await?;
        let descriptor = export_descriptor(&course);
        Ok(ContentSnapshot { course, descriptor })
    }

    pub async fn export_course_content(
        &self,
        course_id: CourseId,
    ) -> Result<CourseUpdate> {
        Ok(self.content_snapshot(course_id).await?.descriptor)
    }

    /// Create a course with an empty content tree.
    pub async fn create_course(&self, request: NewCourse) -> Result<Course> {
        let validator = self.synchronizer.validator();
        let name = validator.validate_name(&request.name)?;
        validator.validate_price(request.price)?;

        let mut course = Course::new(name);
        course.description = request.description;
        course.price = request.price;

        self.unit_of_work.course_trees.create_course(&course).await?;
        info!(course_id = %course.id, name = %course.name, "course created");
        Ok(course)
    }

    pub async fn list_courses(&self) -> Result<Vec<CourseSummary>> {
        self.unit_of_work.course_trees.list_courses().await
    }
}
