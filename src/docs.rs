use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use skillsphere_core::ErrorResponse;
use skillsphere_db::{DeleteResult, DocumentId, InsertOneResult, UpdateResult};

use crate::modules::courses::model::Course;
use crate::modules::enrollments::model::{CreateEnrollmentDto, EnrolledCourse};
use crate::modules::health::controller::HealthStatus;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::root,
        crate::modules::health::controller::liveness,
        crate::modules::health::controller::readiness,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_popular_courses,
        crate::modules::courses::controller::get_course_by_id,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::enrollments::controller::create_enrollment,
        crate::modules::enrollments::controller::get_enrollments,
    ),
    components(
        schemas(
            Course,
            CreateEnrollmentDto,
            EnrolledCourse,
            DocumentId,
            InsertOneResult,
            UpdateResult,
            DeleteResult,
            HealthStatus,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Courses", description = "Course catalogue"),
        (name = "Enrollments", description = "Student enrollments")
    ),
    info(
        title = "SkillSphere API",
        version = "0.1.0",
        description = "Course catalogue and enrollment API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
