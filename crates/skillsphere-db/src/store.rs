//! The document store contract.
//!
//! Handlers only ever talk to a [`DocumentStore`]. Two backends implement
//! it: [`crate::PgDocumentStore`] for deployments and
//! [`crate::MemoryDocumentStore`] for tests and local development. Both must
//! agree on filtering, ordering, unique keys and join semantics.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::document::{DeleteResult, Document, DocumentId, InsertOneResult, UpdateResult};

/// The collections the service reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Courses,
    Enrolled,
}

impl Collection {
    /// Collection name; also the backing table name.
    pub fn name(self) -> &'static str {
        match self {
            Collection::Courses => "courses",
            Collection::Enrolled => "enrolled",
        }
    }

    /// Fields whose combined values must be unique across the collection.
    /// Documents missing any of these fields are exempt.
    pub fn unique_key(self) -> &'static [&'static str] {
        match self {
            Collection::Courses => &[],
            Collection::Enrolled => &["courseId", "studentEmail"],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Missing values first.
    Ascending,
    /// Missing values last.
    Descending,
}

/// One sort key over a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub path: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Descending,
        }
    }

    pub fn segments(&self) -> Vec<String> {
        self.path.split('.').map(str::to_string).collect()
    }
}

/// Equality filter, sort order and limit for a read.
///
/// Results tied on every sort key keep the collection's natural (insertion)
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filter: Document,
    pub sort: Vec<SortKey>,
    pub limit: Option<u32>,
}

impl FindQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires top-level `field` to equal `value`.
    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn matches(&self, doc: &Document) -> bool {
        self.filter
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}

/// Left outer join: for each primary document, embed the document of `from`
/// whose `_id` equals the primary's `local_field`, under `as_field`. The
/// field is omitted when nothing matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub from: Collection,
    pub local_field: String,
    pub as_field: String,
}

impl Lookup {
    pub fn new(
        from: Collection,
        local_field: impl Into<String>,
        as_field: impl Into<String>,
    ) -> Self {
        Self {
            from,
            local_field: local_field.into(),
            as_field: as_field.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document store unavailable: {message}")]
    Connection { message: String },
    #[error("document store query failed: {message}")]
    Query { message: String },
    #[error("document serialization failed: {message}")]
    Serialization { message: String },
    #[error("duplicate key in `{collection}`: {message}")]
    DuplicateKey {
        collection: Collection,
        message: String,
    },
}

impl StoreError {
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Collection-scoped document operations.
///
/// Returned documents always carry their id under `_id`. Ids supplied inside
/// a document body on insert or update are ignored.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(
        &self,
        collection: Collection,
        query: FindQuery,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError>;

    /// Inserts `document` under a fresh id. Fails with
    /// [`StoreError::DuplicateKey`] when it collides on the collection's
    /// unique key.
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOneResult, StoreError>;

    /// Overwrites the top-level fields present in `set`, leaving the rest.
    async fn update_one(
        &self,
        collection: Collection,
        id: DocumentId,
        set: Document,
    ) -> Result<UpdateResult, StoreError>;

    async fn delete_one(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<DeleteResult, StoreError>;

    async fn find_with_lookup(
        &self,
        collection: Collection,
        query: FindQuery,
        lookup: Lookup,
    ) -> Result<Vec<Document>, StoreError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases backend resources. Called once at shutdown.
    async fn close(&self);
}
