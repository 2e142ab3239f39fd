use axum::{Router, routing::get};

use crate::{
    AppState,
    handlers::{content, courses},
};

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            "/courses",
            get(courses::list_courses).post(courses::create_course),
        )
        .route(
            "/courses/{id}/content",
            get(content::get_course_content).patch(content::edit_course_content),
        )
}
