use crate::app_state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct StatusResponse {
    app: &'static str,
    version: &'static str,
    environment: String,
}

/// App metadata for monitoring dashboards (GET /status).
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    // ---
    Json(StatusResponse {
        app: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        environment: state.environment().to_string(),
    })
}
