pub mod course_content;
pub mod unit_of_work;

pub use course_content::{ContentSnapshot, CourseContentService, EditOutcome};
pub use unit_of_work::{AppUnitOfWork, AppUnitOfWorkBuilder};
