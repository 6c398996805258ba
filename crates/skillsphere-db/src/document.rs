//! Documents, identifiers and write-result descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

/// A schema-free document: field name to JSON value.
pub type Document = Map<String, Value>;

/// Field under which a document's identifier is exposed.
pub const ID_FIELD: &str = "_id";

/// Store-assigned document identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a caller-supplied identifier. Returns `None` when `raw` is not
    /// a well-formed id.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DocumentId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Returns `body` with `_id` set to `id`.
pub fn with_id(id: DocumentId, mut body: Document) -> Document {
    body.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    body
}

/// Resolves a dotted path such as `rating.avg` inside `doc`.
pub fn value_at<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = doc.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: DocumentId,
}

impl InsertOneResult {
    pub fn new(inserted_id: DocumentId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<DocumentId>,
    pub upserted_count: u64,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_id: None,
            upserted_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        assert!(DocumentId::parse("not-an-id").is_none());
        assert!(DocumentId::parse("").is_none());
        assert!(DocumentId::parse("507f1f77bcf86cd799439011").is_none());
    }

    #[test]
    fn test_parse_round_trips_display() {
        let id = DocumentId::new();
        assert_eq!(DocumentId::parse(&id.to_string()), Some(id));
    }

    #[test]
    fn test_with_id_overwrites_existing_id() {
        let id = DocumentId::new();
        let body = with_id(id, doc(json!({"_id": "spoofed", "title": "Rust"})));
        assert_eq!(body["_id"], json!(id.to_string()));
        assert_eq!(body["title"], json!("Rust"));
    }

    #[test]
    fn test_value_at_follows_dotted_paths() {
        let course = doc(json!({"rating": {"avg": 4.5}, "title": "Rust"}));
        assert_eq!(value_at(&course, "rating.avg"), Some(&json!(4.5)));
        assert_eq!(value_at(&course, "title"), Some(&json!("Rust")));
        assert_eq!(value_at(&course, "rating.count"), None);
        assert_eq!(value_at(&course, "title.length"), None);
    }

    #[test]
    fn test_result_descriptors_use_camel_case() {
        let id = DocumentId::new();
        let inserted = serde_json::to_value(InsertOneResult::new(id)).unwrap();
        assert_eq!(inserted, json!({"acknowledged": true, "insertedId": id.to_string()}));

        let updated = serde_json::to_value(UpdateResult::new(1, 0)).unwrap();
        assert_eq!(updated["matchedCount"], 1);
        assert_eq!(updated["modifiedCount"], 0);
        assert_eq!(updated["upsertedId"], Value::Null);

        let deleted = serde_json::to_value(DeleteResult::new(1)).unwrap();
        assert_eq!(deleted["deletedCount"], 1);
    }
}
