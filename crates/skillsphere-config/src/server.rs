use std::env;

use crate::{non_empty, parse_or};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub log_dir: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: parse_or(&lookup, "PORT", 3000),
            log_dir: non_empty(&lookup, "LOG_DIR").unwrap_or_else(|| "storage/logs".to_string()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
