use crate::app_state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    status: &'static str,
    database: &'static str,
}

/// Liveness probe (GET /health) - is the process running?
///
/// Touches nothing external; a `200 OK` means only that the server loop is
/// alive and accepting connections.
pub async fn health_check() -> Json<HealthResponse> {
    // ---
    Json(HealthResponse { status: "healthy" })
}

/// Readiness probe (GET /ready) - can we reach the database?
///
/// Round-trips a trivial query through the repository. Responds `503` when
/// the database is unreachable so orchestrators stop routing traffic here.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ReadyResponse>, StatusCode> {
    // ---
    state.repository().ping().await.map_err(|err| {
        tracing::error!("readiness check failed: {err:#}");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    Ok(Json(ReadyResponse {
        status: "ready",
        database: "connected",
    }))
}
