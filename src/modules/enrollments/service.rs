use chrono::Utc;
use serde_json::Value;
use tracing::instrument;

use skillsphere_core::AppError;
use skillsphere_db::{
    Collection, DocumentId, DocumentStore, FindQuery, InsertOneResult, Lookup, SortKey,
};

use crate::modules::enrollments::model::{
    ALREADY_ENROLLED, COURSE_FIELD, CreateEnrollmentDto, EnrolledCourse, Enrollment,
    INVALID_COURSE_ID_FORMAT, MISSING_ENROLLMENT_FIELDS, MISSING_STUDENT_EMAIL,
};

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// `null` and `""` count as absent; any other non-string is kept so it can be
/// rejected as a malformed id.
fn required_value(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null() && v.as_str() != Some(""))
}

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enrolls a student in a course.
    ///
    /// The existence check answers the common case; the collection's unique
    /// key on `(courseId, studentEmail)` settles concurrent requests, and a
    /// collision there is reported the same way.
    #[instrument(skip(store, dto), fields(student = ?dto.student_email))]
    pub async fn create_enrollment(
        store: &dyn DocumentStore,
        actor: &str,
        dto: CreateEnrollmentDto,
    ) -> Result<InsertOneResult, AppError> {
        let (Some(course_id), Some(student_email)) =
            (required_value(dto.course_id), required(dto.student_email))
        else {
            return Err(AppError::bad_request(MISSING_ENROLLMENT_FIELDS));
        };

        let course_id = course_id
            .as_str()
            .and_then(DocumentId::parse)
            .ok_or_else(|| AppError::bad_request(INVALID_COURSE_ID_FORMAT))?
            .to_string();

        let existing = store
            .find(
                Collection::Enrolled,
                FindQuery::new()
                    .filter_eq("courseId", course_id.as_str())
                    .filter_eq("studentEmail", student_email.as_str())
                    .limit(1),
            )
            .await?;
        if !existing.is_empty() {
            return Err(AppError::conflict(ALREADY_ENROLLED));
        }

        let enrollment = Enrollment {
            course_id,
            student_email,
            student_name: dto.student_name,
            student_photo: dto.student_photo,
            enrolled_at: Utc::now(),
        };
        let course_id = enrollment.course_id.clone();

        let result = match store
            .insert_one(Collection::Enrolled, enrollment.into_document()?)
            .await
        {
            Ok(result) => result,
            Err(e) if e.is_duplicate_key() => {
                tracing::debug!(course_id = %course_id, "Concurrent enrollment lost the race");
                return Err(AppError::conflict(ALREADY_ENROLLED));
            }
            Err(e) => return Err(AppError::internal(e)),
        };

        crate::audit_event!(
            "enrollment.create",
            "enrolled",
            actor = %actor,
            course_id = %course_id,
            enrollment_id = %result.inserted_id,
            "Student enrolled"
        );

        Ok(result)
    }

    /// A student's enrollments, newest first, each joined with its course.
    #[instrument(skip(store))]
    pub async fn list_enrollments_for_student(
        store: &dyn DocumentStore,
        student_email: Option<String>,
    ) -> Result<Vec<EnrolledCourse>, AppError> {
        let student_email =
            required(student_email).ok_or_else(|| AppError::bad_request(MISSING_STUDENT_EMAIL))?;

        let query = FindQuery::new()
            .filter_eq("studentEmail", student_email)
            .sort(SortKey::desc("enrolledAt"));
        let lookup = Lookup::new(Collection::Courses, "courseId", COURSE_FIELD);

        let documents = store
            .find_with_lookup(Collection::Enrolled, query, lookup)
            .await?;

        Ok(documents.into_iter().map(EnrolledCourse).collect())
    }
}
