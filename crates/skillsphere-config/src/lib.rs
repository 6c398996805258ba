//! # SkillSphere Config
//!
//! Configuration types for the SkillSphere API, loaded from environment
//! variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`identity`]: Bearer-token verification configuration
//! - [`server`]: Listening port and log directory
//! - [`store`]: Document store backend selection
//!
//! Every type offers `from_env()` and a `from_lookup()` variant that reads
//! from an arbitrary key/value source, so parsing can be tested without
//! touching the process environment.
//!
//! # Example
//!
//! ```ignore
//! use skillsphere_config::{CorsConfig, IdentityConfig, StoreConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let identity_config = IdentityConfig::from_env();
//! let store_config = StoreConfig::from_env()?;
//! ```

pub mod cors;
pub mod identity;
pub mod server;
pub mod store;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use identity::IdentityConfig;
pub use server::ServerConfig;
pub use store::{ConfigError, StoreBackend, StoreConfig};

/// Parses `key` from `lookup`, falling back to `default` when the variable is
/// absent or not a valid `T`.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Reads `key` from `lookup`, treating blank values as unset.
pub(crate) fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
pub(crate) fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}
