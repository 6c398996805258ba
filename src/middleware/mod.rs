//! Middleware for request processing.
//!
//! - [`auth`]: the bearer-token auth gate and the `AuthUser` extractor
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `require_auth` verifies the token and attaches the caller's identity
//! 3. Handlers that need the caller take an `AuthUser` argument
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn create_course(auth_user: AuthUser) -> impl IntoResponse {
//!     tracing::info!(user = auth_user.subject(), "creating course");
//!     // ...
//! }
//! ```

pub mod auth;
