//! Bearer-token verification settings.
//!
//! - `JWT_SECRET`: HS256 signing/verification secret
//! - `JWT_ISSUER`: expected `iss` claim (optional)
//! - `JWT_AUDIENCE`: expected `aud` claim (optional)
//! - `JWT_EXPIRY`: lifetime in seconds of tokens minted locally (default: 3600)

use std::env;

use crate::{non_empty, parse_or};

const DEV_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Clone, Debug)]
pub struct IdentityConfig {
    pub secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub token_expiry: i64,
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            secret: non_empty(&lookup, "JWT_SECRET").unwrap_or_else(|| DEV_SECRET.to_string()),
            issuer: non_empty(&lookup, "JWT_ISSUER"),
            audience: non_empty(&lookup, "JWT_AUDIENCE"),
            token_expiry: parse_or(&lookup, "JWT_EXPIRY", 3600), // 1 hour
        }
    }

    /// True when the secret is the built-in development default.
    pub fn uses_dev_secret(&self) -> bool {
        self.secret == DEV_SECRET
    }
}
