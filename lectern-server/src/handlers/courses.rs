use axum::{Json, extract::State, http::StatusCode};
use lectern_model::{Course, CourseSummary, NewCourse};

use crate::{AppState, infra::errors::AppResult};

pub async fn list_courses(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CourseSummary>>> {
    let courses = state.content.list_courses().await?;
    Ok(Json(courses))
}

pub async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<NewCourse>,
) -> AppResult<(StatusCode, Json<Course>)> {
    let course = state.content.create_course(request).await?;
    Ok((StatusCode::CREATED, Json(course)))
}
