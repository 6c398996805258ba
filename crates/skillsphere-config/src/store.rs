//! Document store backend selection.
//!
//! - `DOCUMENT_STORE`: `postgres` (default) or `memory`
//! - `DATABASE_URL`: PostgreSQL connection string, required for `postgres`
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
//!
//! The `memory` backend keeps everything in process and loses it on exit.
//! It exists for local development and tests.

use std::env;

use crate::{non_empty, parse_or};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("unsupported DOCUMENT_STORE `{0}` (expected `postgres` or `memory`)")]
    UnknownBackend(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { url: String, max_connections: u32 },
    Memory,
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = non_empty(&lookup, "DOCUMENT_STORE").unwrap_or_else(|| "postgres".to_string());

        let backend = match kind.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => StoreBackend::Postgres {
                url: non_empty(&lookup, "DATABASE_URL")
                    .ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5),
            },
            "memory" => StoreBackend::Memory,
            _ => return Err(ConfigError::UnknownBackend(kind)),
        };

        Ok(Self { backend })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup_from;

    #[test]
    fn test_postgres_requires_database_url() {
        let err = StoreConfig::from_lookup(|_| None).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
        assert_eq!(err.to_string(), "DATABASE_URL must be set");
    }

    #[test]
    fn test_postgres_backend() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://app:pw@localhost/course_db"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();
        assert_eq!(
            config.backend,
            StoreBackend::Postgres {
                url: "postgres://app:pw@localhost/course_db".to_string(),
                max_connections: 12,
            }
        );
    }

    #[test]
    fn test_memory_backend_needs_no_url() {
        let config =
            StoreConfig::from_lookup(lookup_from(&[("DOCUMENT_STORE", "Memory")])).unwrap();
        assert_eq!(config.backend, StoreBackend::Memory);
    }

    #[test]
    fn test_unknown_backend() {
        let err =
            StoreConfig::from_lookup(lookup_from(&[("DOCUMENT_STORE", "mongo")])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownBackend("mongo".to_string()));
    }
}
