use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::database::{
    infrastructure::memory::InMemoryCourseTreeRepository,
    ports::course_trees::CourseTreeRepository,
};
#[cfg(feature = "database")]
use crate::database::postgres::PostgresDatabase;

/// Aggregates the repository ports used by application services.
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub course_trees: Arc<dyn CourseTreeRepository>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field(
                "course_trees",
                &type_name_of_val(self.course_trees.as_ref()),
            )
            .finish()
    }
}

impl AppUnitOfWork {
    /// Unit of work backed by the process-local adapters.
    pub fn in_memory() -> Self {
        Self {
            course_trees: Arc::new(InMemoryCourseTreeRepository::new()),
        }
    }
}

#[derive(Default)]
pub struct AppUnitOfWorkBuilder {
    course_trees: Option<Arc<dyn CourseTreeRepository>>,
}

impl fmt::Debug for AppUnitOfWorkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWorkBuilder")
            .field("course_trees", &self.course_trees.is_some())
            .finish()
    }
}

impl AppUnitOfWorkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_course_trees(
        mut self,
        repo: Arc<dyn CourseTreeRepository>,
    ) -> Self {
        self.course_trees = Some(repo);
        self
    }

    /// Build a validated AppUnitOfWork. Returns a string error if any required
    /// repository is missing.
    pub fn build(self) -> Result<AppUnitOfWork, String> {
        Ok(AppUnitOfWork {
            course_trees: self
                .course_trees
                .ok_or_else(|| "missing CourseTreeRepository".to_string())?,
        })
    }
}

#[cfg(feature = "database")]
impl AppUnitOfWork {
    /// Compose the Postgres-backed repositories into a unit of work.
    pub fn from_postgres(db: Arc<PostgresDatabase>) -> Result<Self, String> {
        AppUnitOfWorkBuilder::new().with_postgres(db).build()
    }
}

#[cfg(feature = "database")]
impl AppUnitOfWorkBuilder {
    /// Populate the builder with Postgres-backed repository adapters.
    pub fn with_postgres(mut self, db: Arc<PostgresDatabase>) -> Self {
        let course_trees: Arc<dyn CourseTreeRepository> =
            Arc::new(db.course_trees());
        self.course_trees = Some(course_trees);
        self
    }
}
