use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::AppState;

pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let storage = if state.config().database.url.is_some() {
        "postgres"
    } else {
        "memory"
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "storage": storage,
    }))
}
