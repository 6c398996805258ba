//! In-process [`DocumentStore`] backend.
//!
//! All collections live behind one `RwLock`, so the unique-key check and the
//! insert it guards happen atomically.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::document::{
    DeleteResult, Document, DocumentId, ID_FIELD, InsertOneResult, UpdateResult, with_id,
};
use crate::order::sort_documents;
use crate::store::{Collection, DocumentStore, FindQuery, Lookup, StoreError};

#[derive(Debug, Clone)]
struct StoredDocument {
    id: DocumentId,
    body: Document,
}

impl StoredDocument {
    fn to_document(&self) -> Document {
        with_id(self.id, self.body.clone())
    }
}

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn select<'a>(docs: &'a [StoredDocument], query: &FindQuery) -> Vec<&'a StoredDocument> {
    let mut selected: Vec<&StoredDocument> =
        docs.iter().filter(|d| query.matches(&d.body)).collect();
    sort_documents(&mut selected, &query.sort, |d| &d.body);
    if let Some(limit) = query.limit {
        selected.truncate(limit as usize);
    }
    selected
}

fn unique_values<'a>(collection: Collection, body: &'a Document) -> Option<Vec<&'a Value>> {
    let key = collection.unique_key();
    if key.is_empty() {
        return None;
    }
    key.iter().map(|field| body.get(*field)).collect()
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    #[instrument(skip(self))]
    async fn find(
        &self,
        collection: Collection,
        query: FindQuery,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let docs = collections.get(&collection).map(Vec::as_slice).unwrap_or_default();
        Ok(select(docs, &query)
            .into_iter()
            .map(StoredDocument::to_document)
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .map(StoredDocument::to_document))
    }

    #[instrument(skip(self, document))]
    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<InsertOneResult, StoreError> {
        document.remove(ID_FIELD);

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        if let Some(values) = unique_values(collection, &document) {
            let taken = docs
                .iter()
                .any(|d| unique_values(collection, &d.body).as_ref() == Some(&values));
            if taken {
                return Err(StoreError::DuplicateKey {
                    collection,
                    message: format!("{:?} already exists", collection.unique_key()),
                });
            }
        }

        let id = DocumentId::new();
        docs.push(StoredDocument { id, body: document });
        Ok(InsertOneResult::new(id))
    }

    #[instrument(skip(self, set))]
    async fn update_one(
        &self,
        collection: Collection,
        id: DocumentId,
        mut set: Document,
    ) -> Result<UpdateResult, StoreError> {
        set.remove(ID_FIELD);

        let mut collections = self.collections.write().await;
        let Some(stored) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(UpdateResult::new(0, 0));
        };

        let mut modified = false;
        for (field, value) in set {
            if stored.body.get(&field) != Some(&value) {
                stored.body.insert(field, value);
                modified = true;
            }
        }

        Ok(UpdateResult::new(1, u64::from(modified)))
    }

    #[instrument(skip(self))]
    async fn delete_one(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<DeleteResult, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(DeleteResult::new(0));
        };

        match docs.iter().position(|d| d.id == id) {
            Some(index) => {
                docs.remove(index);
                Ok(DeleteResult::new(1))
            }
            None => Ok(DeleteResult::new(0)),
        }
    }

    #[instrument(skip(self))]
    async fn find_with_lookup(
        &self,
        collection: Collection,
        query: FindQuery,
        lookup: Lookup,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let primary = collections.get(&collection).map(Vec::as_slice).unwrap_or_default();
        let foreign = collections.get(&lookup.from).map(Vec::as_slice).unwrap_or_default();

        let joined = select(primary, &query)
            .into_iter()
            .map(|stored| {
                let mut document = stored.to_document();
                let matched = stored
                    .body
                    .get(&lookup.local_field)
                    .and_then(Value::as_str)
                    .and_then(DocumentId::parse)
                    .and_then(|key| foreign.iter().find(|f| f.id == key));
                if let Some(found) = matched {
                    document.insert(lookup.as_field.clone(), Value::Object(found.to_document()));
                }
                document
            })
            .collect();

        Ok(joined)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {
        tracing::debug!("Closing in-memory document store");
    }
}
