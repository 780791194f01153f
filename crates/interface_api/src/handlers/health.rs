//! Health handlers

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Readiness probe
///
/// The in-memory store is ready as soon as the process is up; this
/// stays a separate route so deployments keep distinct probes.
pub async fn readiness_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ready" })
}
