use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use cors_manager::{RawPolicy, StatusReport};

use crate::cors::AppState;

pub async fn greet(State(state): State<AppState>) -> impl IntoResponse {
    Html(format!(
        "<h1>{}</h1><p>Try calling this endpoint from your frontend to see CORS in action.</p>",
        state.greeting
    ))
}

pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    StatusReport::from(state.store.snapshot().as_ref()).to_string()
}

pub async fn save_settings(
    State(state): State<AppState>,
    Json(submission): Json<RawPolicy>,
) -> impl IntoResponse {
    match state.store.update(&submission) {
        Ok(policy) => (StatusCode::OK, StatusReport::from(policy.as_ref()).to_string()),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}
