//! # SkillSphere DB
//!
//! Document store client for the SkillSphere API.
//!
//! The service stores schema-free JSON documents in two collections,
//! `courses` and `enrolled`. This crate provides:
//!
//! - [`document`]: documents, ids and write-result descriptors
//! - [`store`]: the [`DocumentStore`] trait and its query types
//! - [`postgres`]: the PostgreSQL (JSONB) backend
//! - [`memory`]: an in-process backend for tests and local development
//!
//! # Example
//!
//! ```ignore
//! use skillsphere_config::StoreConfig;
//! use skillsphere_db::{Collection, FindQuery, init_store};
//!
//! let store = init_store(&StoreConfig::from_env()?).await?;
//! let courses = store.find(Collection::Courses, FindQuery::new()).await?;
//! store.close().await;
//! ```

use std::sync::Arc;

use skillsphere_config::{StoreBackend, StoreConfig};

pub mod document;
pub mod memory;
mod order;
pub mod postgres;
pub mod store;

// Re-export commonly used types at crate root
pub use document::{
    DeleteResult, Document, DocumentId, ID_FIELD, InsertOneResult, UpdateResult, value_at, with_id,
};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use store::{Collection, DocumentStore, FindQuery, Lookup, SortDirection, SortKey, StoreError};

/// Opens the configured document store.
///
/// For PostgreSQL this connects the pool and applies pending migrations. The
/// returned handle is meant to be created once at startup, shared by every
/// request, and closed with [`DocumentStore::close`] at shutdown.
pub async fn init_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match &config.backend {
        StoreBackend::Postgres {
            url,
            max_connections,
        } => {
            let store = PgDocumentStore::connect(url, *max_connections).await?;
            store.migrate().await?;
            tracing::info!(max_connections, "Connected to PostgreSQL document store");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on exit");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_memory_store() {
        let config = StoreConfig {
            backend: StoreBackend::Memory,
        };
        let store = init_store(&config).await.unwrap();
        assert!(store.ping().await.is_ok());
        assert!(store.find(Collection::Courses, FindQuery::new()).await.unwrap().is_empty());
    }
}
