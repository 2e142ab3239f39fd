use serde::{Deserialize, Serialize};

use crate::{ids::CourseId, tree::Course};

/// Catalog row: a course without its content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: CourseId,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub review: f32,
    pub review_number: i32,
    pub chapter_count: usize,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            name: course.name.clone(),
            description: course.description.clone(),
            price: course.price,
            review: course.review,
            review_number: course.review_number,
            chapter_count: course.chapters.len(),
        }
    }
}

/// Request body for creating an empty course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: i64,
}
