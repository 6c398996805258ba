use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, Method, header, request::Parts},
    middleware::Next,
    response::Response,
};

use skillsphere_auth::Identity;
use skillsphere_core::AppError;

use crate::state::AppState;

pub const NO_TOKEN_MESSAGE: &str = "No token provided";
pub const INVALID_HEADER_MESSAGE: &str = "Invalid auth header format";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Identity of the caller on a protected route.
///
/// Inserted into request extensions by [`require_auth`]; extracting it on a
/// route that is not behind the gate fails with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn subject(&self) -> &str {
        &self.0.subject
    }

    pub fn email(&self) -> Option<&str> {
        self.0.email.as_deref()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(NO_TOKEN_MESSAGE))
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is case-sensitive and the value must be exactly two
/// space-separated parts with a non-empty token.
pub fn bearer_token(value: &HeaderValue) -> Result<&str, AppError> {
    let raw = value
        .to_str()
        .map_err(|_| AppError::unauthorized(INVALID_HEADER_MESSAGE))?;

    let mut parts = raw.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AppError::unauthorized(INVALID_HEADER_MESSAGE)),
    }
}

/// Auth gate for protected routes.
///
/// Pre-flight requests pass through untouched. Otherwise the bearer token is
/// verified and the caller's identity attached to the request. A missing or
/// malformed header yields 401, a rejected token 403. The verifier's reason
/// is logged, never returned.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path().to_string();

    let token = {
        let Some(header_value) = req.headers().get(header::AUTHORIZATION) else {
            crate::security_event!(
                "auth.missing_token",
                path = %path,
                "Rejected request without credentials"
            );
            return Err(AppError::unauthorized(NO_TOKEN_MESSAGE));
        };

        bearer_token(header_value)
            .inspect_err(|_| {
                crate::security_event!(
                    "auth.malformed_header",
                    path = %path,
                    "Rejected malformed authorization header"
                );
            })?
            .to_string()
    };

    let identity = match state.verifier.verify(&token).await {
        Ok(identity) => identity,
        Err(err) if !err.is_rejection() => return Err(AppError::internal(err)),
        Err(err) => {
            crate::security_event!(
                "auth.invalid_token",
                path = %path,
                error = %err,
                "Token verification failed"
            );
            return Err(AppError::forbidden(INVALID_TOKEN_MESSAGE));
        }
    };

    tracing::debug!(user.id = %identity.subject, "Authenticated request");
    req.extensions_mut().insert(AuthUser(identity));

    Ok(next.run(req).await)
}
