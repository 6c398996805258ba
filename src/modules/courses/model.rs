use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use skillsphere_db::Document;

pub const INVALID_COURSE_ID: &str = "Invalid course id";
pub const COURSE_NOT_FOUND: &str = "Course not found";

/// Size of the popular-courses shelf.
pub const POPULAR_COURSES_LIMIT: u32 = 6;

/// Sort keys for the popular-courses shelf, highest rated first.
pub const RATING_FIELD: &str = "rating.avg";
pub const CREATED_AT_FIELD: &str = "createdAt";

/// A course document.
///
/// Courses have no fixed shape: every field except `_id` is supplied by the
/// caller and stored as sent. Well-known fields include `title`,
/// `description`, `price`, `instructor`, `rating.avg` and `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct Course(pub Document);

impl Course {
    pub fn into_document(self) -> Document {
        self.0
    }
}

impl From<Document> for Course {
    fn from(document: Document) -> Self {
        Self(document)
    }
}
