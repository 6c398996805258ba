//! Token claims and the identity decoded from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims carried by a bearer token.
///
/// `sub` and `exp` are required. Registered and custom claims other than the
/// named fields are kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id at the identity provider)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Issued-at timestamp (Unix timestamp)
    #[serde(default)]
    pub iat: usize,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Identity of the caller, attached to an authenticated request.
/// Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub subject: String,
    pub email: Option<String>,
    /// Every claim of the verified token, including `sub` and `exp`.
    pub claims: Map<String, Value>,
}

impl From<TokenClaims> for Identity {
    fn from(token: TokenClaims) -> Self {
        let mut claims = token.extra;
        claims.insert("sub".to_string(), Value::from(token.sub.clone()));
        claims.insert("exp".to_string(), Value::from(token.exp));
        claims.insert("iat".to_string(), Value::from(token.iat));
        if let Some(email) = &token.email {
            claims.insert("email".to_string(), Value::from(email.clone()));
        }

        Self {
            subject: token.sub,
            email: token.email,
            claims,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_deserialize_keeps_unknown_claims() {
        let json = r#"{
            "sub": "uid-1",
            "email": "ada@example.com",
            "exp": 9999999999,
            "iat": 1,
            "email_verified": true,
            "iss": "https://auth.example.com"
        }"#;
        let claims: TokenClaims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "uid-1");
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
        assert_eq!(claims.extra["email_verified"], Value::Bool(true));
        assert_eq!(claims.extra["iss"], "https://auth.example.com");
    }

    #[test]
    fn test_email_is_optional() {
        let claims: TokenClaims = serde_json::from_str(r#"{"sub":"uid-2","exp":1}"#).unwrap();
        assert_eq!(claims.email, None);
        assert_eq!(claims.iat, 0);
    }

    #[test]
    fn test_identity_exposes_all_claims() {
        let claims: TokenClaims =
            serde_json::from_str(r#"{"sub":"uid-3","exp":10,"iat":5,"role":"student"}"#).unwrap();
        let identity = Identity::from(claims);

        assert_eq!(identity.subject, "uid-3");
        assert_eq!(identity.claims["sub"], "uid-3");
        assert_eq!(identity.claims["exp"], 10);
        assert_eq!(identity.claims["role"], "student");
        assert!(!identity.claims.contains_key("email"));
    }
}
