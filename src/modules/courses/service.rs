use tracing::instrument;

use skillsphere_core::AppError;
use skillsphere_db::{
    Collection, DeleteResult, DocumentId, DocumentStore, FindQuery, InsertOneResult, SortKey,
    UpdateResult,
};

use crate::modules::courses::model::{
    COURSE_NOT_FOUND, CREATED_AT_FIELD, Course, INVALID_COURSE_ID, POPULAR_COURSES_LIMIT,
    RATING_FIELD,
};

pub struct CourseService;

impl CourseService {
    /// Rejects malformed ids before they reach the store.
    pub fn parse_course_id(raw: &str) -> Result<DocumentId, AppError> {
        DocumentId::parse(raw).ok_or_else(|| AppError::bad_request(INVALID_COURSE_ID))
    }

    #[instrument(skip(store))]
    pub async fn list_courses(store: &dyn DocumentStore) -> Result<Vec<Course>, AppError> {
        let documents = store.find(Collection::Courses, FindQuery::new()).await?;
        Ok(documents.into_iter().map(Course::from).collect())
    }

    #[instrument(skip(store))]
    pub async fn list_popular_courses(store: &dyn DocumentStore) -> Result<Vec<Course>, AppError> {
        let query = FindQuery::new()
            .sort(SortKey::desc(RATING_FIELD))
            .sort(SortKey::desc(CREATED_AT_FIELD))
            .limit(POPULAR_COURSES_LIMIT);

        let documents = store.find(Collection::Courses, query).await?;
        Ok(documents.into_iter().map(Course::from).collect())
    }

    #[instrument(skip(store))]
    pub async fn get_course(store: &dyn DocumentStore, id: &str) -> Result<Course, AppError> {
        let id = Self::parse_course_id(id)?;

        store
            .find_by_id(Collection::Courses, id)
            .await?
            .map(Course::from)
            .ok_or_else(|| AppError::not_found(COURSE_NOT_FOUND))
    }

    #[instrument(skip(store, course))]
    pub async fn create_course(
        store: &dyn DocumentStore,
        actor: &str,
        course: Course,
    ) -> Result<InsertOneResult, AppError> {
        let result = store
            .insert_one(Collection::Courses, course.into_document())
            .await?;

        crate::audit_event!(
            "course.create",
            "courses",
            actor = %actor,
            course_id = %result.inserted_id,
            "Course created"
        );

        Ok(result)
    }

    /// Overwrites the submitted top-level fields. An id with no matching
    /// course is reported through `matchedCount`, not as an error.
    #[instrument(skip(store, patch))]
    pub async fn update_course(
        store: &dyn DocumentStore,
        actor: &str,
        id: &str,
        patch: Course,
    ) -> Result<UpdateResult, AppError> {
        let id = Self::parse_course_id(id)?;

        let result = store
            .update_one(Collection::Courses, id, patch.into_document())
            .await?;

        crate::audit_event!(
            "course.update",
            "courses",
            actor = %actor,
            course_id = %id,
            matched = result.matched_count,
            modified = result.modified_count,
            "Course updated"
        );

        Ok(result)
    }

    #[instrument(skip(store))]
    pub async fn delete_course(
        store: &dyn DocumentStore,
        actor: &str,
        id: &str,
    ) -> Result<DeleteResult, AppError> {
        let id = Self::parse_course_id(id)?;

        let result = store.delete_one(Collection::Courses, id).await?;

        crate::audit_event!(
            "course.delete",
            "courses",
            actor = %actor,
            course_id = %id,
            deleted = result.deleted_count,
            "Course deleted"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use skillsphere_db::{Document, MemoryDocumentStore};

    fn course(value: serde_json::Value) -> Course {
        Course(serde_json::from_value::<Document>(value).unwrap())
    }

    #[test]
    fn test_parse_course_id_rejects_garbage() {
        let err = CourseService::parse_course_id("not-an-id").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, INVALID_COURSE_ID);
    }

    #[tokio::test]
    async fn test_get_course_not_found() {
        let store = MemoryDocumentStore::new();
        let err = CourseService::get_course(&store, &DocumentId::new().to_string())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, COURSE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_then_get_returns_inserted_fields() {
        let store = MemoryDocumentStore::new();
        let inserted = CourseService::create_course(
            &store,
            "uid-1",
            course(json!({"title": "Rust 101", "price": 49})),
        )
        .await
        .unwrap();

        let found = CourseService::get_course(&store, &inserted.inserted_id.to_string())
            .await
            .unwrap();

        assert_eq!(found.0["title"], "Rust 101");
        assert_eq!(found.0["price"], 49);
        assert_eq!(found.0["_id"], inserted.inserted_id.to_string());
    }

    #[tokio::test]
    async fn test_update_missing_course_matches_nothing() {
        let store = MemoryDocumentStore::new();
        let result = CourseService::update_course(
            &store,
            "uid-1",
            &DocumentId::new().to_string(),
            course(json!({"title": "Y"})),
        )
        .await
        .unwrap();

        assert_eq!(result.matched_count, 0);
        assert_eq!(result.modified_count, 0);
    }

    #[tokio::test]
    async fn test_popular_courses_ordering_and_limit() {
        let store = MemoryDocumentStore::new();
        for (avg, created) in [
            (4.1, "2025-01-01T00:00:00.000Z"),
            (4.9, "2025-01-02T00:00:00.000Z"),
            (4.9, "2025-01-05T00:00:00.000Z"),
            (3.0, "2025-01-03T00:00:00.000Z"),
            (4.5, "2025-01-04T00:00:00.000Z"),
            (2.0, "2025-01-06T00:00:00.000Z"),
            (5.0, "2025-01-07T00:00:00.000Z"),
        ] {
            CourseService::create_course(
                &store,
                "uid-1",
                course(json!({"rating": {"avg": avg}, "createdAt": created})),
            )
            .await
            .unwrap();
        }

        let popular = CourseService::list_popular_courses(&store).await.unwrap();
        let ratings: Vec<f64> = popular
            .iter()
            .map(|c| c.0["rating"]["avg"].as_f64().unwrap())
            .collect();

        assert_eq!(popular.len(), 6);
        assert_eq!(ratings, vec![5.0, 4.9, 4.9, 4.5, 4.1, 3.0]);
        assert_eq!(popular[1].0["createdAt"], "2025-01-05T00:00:00.000Z");
        assert_eq!(popular[2].0["createdAt"], "2025-01-02T00:00:00.000Z");
    }
}
