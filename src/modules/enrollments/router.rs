use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{create_enrollment, get_enrollments};

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new().route(
        "/my-enrolled-course",
        post(create_enrollment).get(get_enrollments),
    )
}
