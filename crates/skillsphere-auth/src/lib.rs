//! # SkillSphere Auth
//!
//! Identity verification for bearer tokens.
//!
//! - [`claims`]: token claims and the decoded [`Identity`]
//! - [`verifier`]: the [`IdentityVerifier`] trait, its JWT implementation and
//!   a token minting helper for local development
//!
//! # Example
//!
//! ```ignore
//! use skillsphere_auth::{IdentityVerifier, JwtIdentityVerifier, create_token};
//! use skillsphere_config::IdentityConfig;
//!
//! let config = IdentityConfig::from_env();
//! let token = create_token("user-42", Some("ada@example.com"), &config)?;
//!
//! let verifier = JwtIdentityVerifier::new(config);
//! let identity = verifier.verify(&token).await?;
//! assert_eq!(identity.subject, "user-42");
//! ```

pub mod claims;
pub mod verifier;

// Re-export commonly used types at crate root
pub use claims::{Identity, TokenClaims};
pub use verifier::{IdentityVerifier, JwtIdentityVerifier, VerifyError, create_token};
