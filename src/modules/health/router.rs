use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{liveness, readiness, root};

pub fn init_health_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
}
