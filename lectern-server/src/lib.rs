//! # Lectern Server
//!
//! Thin HTTP surface over the Lectern authoring core.
//!
//! Authoring clients submit a whole edited course tree as one multipart
//! request; the server decodes it into a descriptor plus an ordered
//! attachment list and hands both to
//! [`CourseContentService`](lectern_core::application::CourseContentService).

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::trace::TraceLayer;

use crate::infra::cors::cors_layer;

pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let cors = cors_layer(&config.cors, config.dev_mode);
    let body_limit = DefaultBodyLimit::max(config.content.max_request_bytes);

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(routes::create_api_router())
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
