use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use skillsphere_db::Document;

pub const MISSING_ENROLLMENT_FIELDS: &str = "courseId and studentEmail are required";
pub const INVALID_COURSE_ID_FORMAT: &str = "Invalid courseId format";
pub const MISSING_STUDENT_EMAIL: &str = "studentEmail is required";
pub const ALREADY_ENROLLED: &str = "You are already enrolled in this course";

/// Field the joined course is embedded under in enrollment listings.
pub const COURSE_FIELD: &str = "course";

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnrollmentDto {
    /// Any JSON value; a non-string is rejected as a malformed id.
    #[schema(value_type = Option<String>, example = "6c0b6a4e-63b1-4d7c-9df1-0d4a4f0b8f11")]
    pub course_id: Option<Value>,
    #[schema(example = "ada@example.com")]
    pub student_email: Option<String>,
    pub student_name: Option<String>,
    pub student_photo: Option<String>,
}

/// An enrollment as written to the `enrolled` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub course_id: String,
    pub student_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_photo: Option<String>,
    #[serde(with = "skillsphere_core::serde::timestamp_millis")]
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn into_document(self) -> Result<Document, serde_json::Error> {
        serde_json::to_value(self).and_then(serde_json::from_value)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EnrollmentQuery {
    /// Email of the student whose enrollments to list
    pub student_email: Option<String>,
}

/// An enrollment with its course embedded under `course`. The field is
/// absent when the course has since been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct EnrolledCourse(pub Document);
