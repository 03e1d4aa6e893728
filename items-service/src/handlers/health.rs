use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Seconds since the application was built, from a monotonic clock.
    pub uptime: f64,
    pub database: &'static str,
}

/// Liveness: always `OK` with uptime. The database field only reports the
/// store state, it never turns the probe unhealthy.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        uptime: state.uptime().as_secs_f64(),
        database: state.store.status_label().await,
    })
}

/// Readiness: 200 only when the store answers a ping.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
