use std::sync::Arc;

use skillsphere_auth::{IdentityVerifier, JwtIdentityVerifier};
use skillsphere_config::{CorsConfig, IdentityConfig, StoreConfig};
use skillsphere_db::{DocumentStore, init_store};

/// Shared handles for every request. The store and verifier are opened once
/// at startup; cloning the state only clones the `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        verifier: Arc<dyn IdentityVerifier>,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            store,
            verifier,
            cors_config,
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let store = init_store(&StoreConfig::from_env()?).await?;

    let identity_config = IdentityConfig::from_env();
    if identity_config.uses_dev_secret() {
        tracing::warn!("JWT_SECRET is not set; using the development secret");
    }

    Ok(AppState::new(
        store,
        Arc::new(JwtIdentityVerifier::new(identity_config)),
        CorsConfig::from_env(),
    ))
}
