#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use skillsphere::router::init_router;
use skillsphere::state::AppState;
use skillsphere_auth::{IdentityVerifier, JwtIdentityVerifier, create_token};
use skillsphere_config::{CorsConfig, IdentityConfig};
use skillsphere_db::{DocumentStore, MemoryDocumentStore};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

pub fn identity_config() -> IdentityConfig {
    IdentityConfig {
        secret: TEST_SECRET.to_string(),
        issuer: None,
        audience: None,
        token_expiry: 3600,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn DocumentStore>,
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with_verifier(Arc::new(JwtIdentityVerifier::new(identity_config())))
}

pub fn setup_test_app_with_verifier(verifier: Arc<dyn IdentityVerifier>) -> TestApp {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let state = AppState::new(store.clone(), verifier, CorsConfig::default());
    TestApp {
        router: init_router(state),
        store,
    }
}

pub fn get_auth_token() -> String {
    create_token("uid-test", Some("ada@example.com"), &identity_config()).unwrap()
}

pub async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

pub async fn send_request(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    (status, body)
}

pub async fn create_course(app: &TestApp, token: &str, course: Value) -> String {
    let (status, body) = send(app, "POST", "/courses", Some(token), Some(course)).await;
    assert_eq!(status, StatusCode::OK, "create course failed: {body}");
    body["insertedId"].as_str().unwrap().to_string()
}
