use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

pub const ROOT_MESSAGE: &str = "SkillSphere API is running";

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = String, content_type = "text/plain")
    ),
    tag = "Health"
)]
pub async fn root() -> &'static str {
    ROOT_MESSAGE
}

#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Process is up", body = HealthStatus)
    ),
    tag = "Health"
)]
pub async fn liveness() -> Json<HealthStatus> {
    Json(HealthStatus::new("ok"))
}

/// Reports ready only while the document store answers.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Document store reachable", body = HealthStatus),
        (status = 503, description = "Document store unreachable", body = HealthStatus)
    ),
    tag = "Health"
)]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus::new("ok"))),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus::new("unavailable")),
            )
        }
    }
}
