use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use skillsphere_core::{AppError, ErrorResponse};
use skillsphere_db::InsertOneResult;

use crate::middleware::auth::AuthUser;
use crate::modules::enrollments::model::{CreateEnrollmentDto, EnrolledCourse, EnrollmentQuery};
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/my-enrolled-course",
    request_body = CreateEnrollmentDto,
    responses(
        (status = 201, description = "Enrollment created", body = InsertOneResult),
        (status = 400, description = "Missing field or malformed courseId", body = ErrorResponse),
        (status = 401, description = "Missing or malformed credentials", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
        (status = 409, description = "Student already enrolled in this course",
            body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_enrollment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateEnrollmentDto>,
) -> Result<(StatusCode, Json<InsertOneResult>), AppError> {
    let result =
        EnrollmentService::create_enrollment(state.store.as_ref(), auth_user.subject(), dto)
            .await?;

    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    get,
    path = "/my-enrolled-course",
    params(EnrollmentQuery),
    responses(
        (status = 200, description = "Enrollments newest first, each with its course",
            body = Vec<EnrolledCourse>),
        (status = 400, description = "studentEmail missing", body = ErrorResponse),
        (status = 401, description = "Missing or malformed credentials", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_enrollments(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(query): Query<EnrollmentQuery>,
) -> Result<Json<Vec<EnrolledCourse>>, AppError> {
    let enrollments =
        EnrollmentService::list_enrollments_for_student(state.store.as_ref(), query.student_email)
            .await?;

    Ok(Json(enrollments))
}
