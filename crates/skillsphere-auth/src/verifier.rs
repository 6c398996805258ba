//! Bearer-token verification.
//!
//! [`IdentityVerifier`] is the seam the HTTP layer depends on. The shipped
//! implementation, [`JwtIdentityVerifier`], checks HS256-signed JWTs locally;
//! an implementation that calls out to a hosted identity provider can be
//! swapped in without touching the handlers.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::{Map, Value};

use skillsphere_config::IdentityConfig;

use crate::claims::{Identity, TokenClaims};

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("token has expired")]
    Expired,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token is invalid: {0}")]
    Invalid(String),
    /// The verifier itself failed; says nothing about the token.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

impl VerifyError {
    /// True when the token was examined and rejected.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, VerifyError::Unavailable(_))
    }
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => VerifyError::Expired,
            ErrorKind::InvalidSignature => VerifyError::InvalidSignature,
            _ => VerifyError::Invalid(err.to_string()),
        }
    }
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Validates `token` and returns the identity it asserts.
    async fn verify(&self, token: &str) -> Result<Identity, VerifyError>;
}

pub struct JwtIdentityVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityVerifier {
    pub fn new(config: IdentityConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, VerifyError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(Identity::from(data.claims))
    }
}

/// Mints a token that [`JwtIdentityVerifier`] built from the same `config`
/// accepts. Intended for local development and tests.
pub fn create_token(
    subject: &str,
    email: Option<&str>,
    config: &IdentityConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp().max(0) as usize;
    let exp = now + config.token_expiry.max(0) as usize;

    let mut extra = Map::new();
    if let Some(issuer) = &config.issuer {
        extra.insert("iss".to_string(), Value::from(issuer.clone()));
    }
    if let Some(audience) = &config.audience {
        extra.insert("aud".to_string(), Value::from(audience.clone()));
    }

    let claims = TokenClaims {
        sub: subject.to_string(),
        email: email.map(str::to_string),
        exp,
        iat: now,
        extra,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}
