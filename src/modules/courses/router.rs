use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_course, delete_course, get_course_by_id, get_courses, get_popular_courses,
    update_course,
};

/// Course reads open to anonymous callers.
pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(get_courses))
        .route("/popular-courses", get(get_popular_courses))
}

/// Course routes that sit behind the auth gate.
pub fn init_protected_courses_router() -> Router<AppState> {
    Router::new()
        .route("/courses", post(create_course))
        .route(
            "/courses/{id}",
            get(get_course_by_id).put(update_course).delete(delete_course),
        )
}
