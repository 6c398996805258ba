use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use skillsphere_core::{AppError, ErrorResponse};
use skillsphere_db::{DeleteResult, InsertOneResult, UpdateResult};

use crate::middleware::auth::AuthUser;
use crate::modules::courses::model::Course;
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "Every course in insertion order", body = Vec<Course>),
        (status = 500, description = "Document store failure", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_courses(state.store.as_ref()).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/popular-courses",
    responses(
        (status = 200, description = "Up to six courses, best rated and newest first",
            body = Vec<Course>),
        (status = 500, description = "Document store failure", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_popular_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_popular_courses(state.store.as_ref()).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 400, description = "Malformed course id", body = ErrorResponse),
        (status = 401, description = "Missing or malformed credentials", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_course(state.store.as_ref(), &id).await?;
    Ok(Json(course))
}

#[utoipa::path(
    post,
    path = "/courses",
    request_body = Course,
    responses(
        (status = 200, description = "Course created", body = InsertOneResult),
        (status = 401, description = "Missing or malformed credentials", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, course))]
pub async fn create_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(course): ValidatedJson<Course>,
) -> Result<Json<InsertOneResult>, AppError> {
    let result =
        CourseService::create_course(state.store.as_ref(), auth_user.subject(), course).await?;
    Ok(Json(result))
}

#[utoipa::path(
    put,
    path = "/courses/{id}",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    request_body(content = Course, description = "Fields to overwrite; other fields are kept"),
    responses(
        (status = 200, description = "Update outcome; matchedCount is 0 for an unknown id",
            body = UpdateResult),
        (status = 400, description = "Malformed course id", body = ErrorResponse),
        (status = 401, description = "Missing or malformed credentials", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, patch))]
pub async fn update_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<Course>,
) -> Result<Json<UpdateResult>, AppError> {
    let result =
        CourseService::update_course(state.store.as_ref(), auth_user.subject(), &id, patch).await?;
    Ok(Json(result))
}

#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Delete outcome", body = DeleteResult),
        (status = 400, description = "Malformed course id", body = ErrorResponse),
        (status = 401, description = "Missing or malformed credentials", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, AppError> {
    let result =
        CourseService::delete_course(state.store.as_ref(), auth_user.subject(), &id).await?;
    Ok(Json(result))
}
