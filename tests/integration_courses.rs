mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_course, get_auth_token, send, send_request, setup_test_app};
use serde_json::json;
use skillsphere_db::DocumentId;

#[tokio::test]
async fn test_root_banner() {
    let app = setup_test_app();
    let (status, body) = send(&app, "GET", "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("SkillSphere API is running"));
}

#[tokio::test]
async fn test_course_lifecycle() {
    let app = setup_test_app();
    let token = get_auth_token();

    let id = create_course(&app, &token, json!({"title": "X"})).await;

    let (status, body) = send(&app, "GET", &format!("/courses/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "X");
    assert_eq!(body["_id"], id);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/courses/{id}"),
        Some(&token),
        Some(json!({"title": "Y"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], 1);
    assert_eq!(body["modifiedCount"], 1);

    let (_, body) = send(&app, "GET", &format!("/courses/{id}"), Some(&token), None).await;
    assert_eq!(body["title"], "Y");

    let (status, body) = send(&app, "DELETE", &format!("/courses/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);

    let (status, body) = send(&app, "GET", &format!("/courses/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Course not found");
}

#[tokio::test]
async fn test_update_keeps_unsubmitted_fields() {
    let app = setup_test_app();
    let token = get_auth_token();
    let id = create_course(&app, &token, json!({"title": "Rust", "price": 30})).await;

    send(
        &app,
        "PUT",
        &format!("/courses/{id}"),
        Some(&token),
        Some(json!({"price": 45})),
    )
    .await;

    let (_, body) = send(&app, "GET", &format!("/courses/{id}"), Some(&token), None).await;
    assert_eq!(body["title"], "Rust");
    assert_eq!(body["price"], 45);
}

#[tokio::test]
async fn test_list_courses_is_public_and_in_insertion_order() {
    let app = setup_test_app();
    let token = get_auth_token();
    for title in ["first", "second", "third"] {
        create_course(&app, &token, json!({"title": title})).await;
    }

    let (status, body) = send(&app, "GET", "/courses", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_popular_courses_limit_and_order() {
    let app = setup_test_app();
    let token = get_auth_token();

    let courses = [
        ("a", 3.5, "2025-01-01T00:00:00.000Z"),
        ("b", 4.8, "2025-01-02T00:00:00.000Z"),
        ("c", 4.8, "2025-02-01T00:00:00.000Z"),
        ("d", 2.1, "2025-01-03T00:00:00.000Z"),
        ("e", 4.0, "2025-01-04T00:00:00.000Z"),
        ("f", 5.0, "2025-01-05T00:00:00.000Z"),
        ("g", 1.0, "2025-01-06T00:00:00.000Z"),
        ("h", 4.2, "2025-01-07T00:00:00.000Z"),
    ];
    for (title, avg, created_at) in courses {
        create_course(
            &app,
            &token,
            json!({"title": title, "rating": {"avg": avg}, "createdAt": created_at}),
        )
        .await;
    }

    let (status, body) = send(&app, "GET", "/popular-courses", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["f", "c", "b", "h", "e", "a"]);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = setup_test_app();
    let token = get_auth_token();

    for method in ["GET", "DELETE"] {
        let (status, body) = send(&app, method, "/courses/not-an-id", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid course id");
    }

    let (status, _) = send(
        &app,
        "PUT",
        "/courses/not-an-id",
        Some(&token),
        Some(json!({"title": "Y"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_with_array_body_is_bad_request() {
    let app = setup_test_app();
    let token = get_auth_token();
    let id = create_course(&app, &token, json!({"title": "Rust"})).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/courses/{id}"),
        Some(&token),
        Some(json!([{"title": "Y"}])),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request body");

    let (_, course) = send(&app, "GET", &format!("/courses/{id}"), Some(&token), None).await;
    assert_eq!(course["title"], "Rust");
}

#[tokio::test]
async fn test_create_without_content_type_is_bad_request() {
    let app = setup_test_app();
    let token = get_auth_token();

    let request = Request::builder()
        .method("POST")
        .uri("/courses")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(r#"{"title": "Rust"}"#))
        .unwrap();
    let (status, body) = send_request(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing 'Content-Type: application/json' header");

    let (_, courses) = send(&app, "GET", "/courses", None, None).await;
    assert_eq!(courses, json!([]));
}

#[tokio::test]
async fn test_update_absent_course_matches_nothing() {
    let app = setup_test_app();
    let token = get_auth_token();
    let id = DocumentId::new();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/courses/{id}"),
        Some(&token),
        Some(json!({"title": "Y"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], 0);
}

#[tokio::test]
async fn test_supplied_id_is_ignored_on_create() {
    let app = setup_test_app();
    let token = get_auth_token();
    let supplied = DocumentId::new().to_string();

    let id = create_course(&app, &token, json!({"_id": supplied, "title": "X"})).await;

    assert_ne!(id, supplied);
    let (status, _) = send(&app, "GET", &format!("/courses/{supplied}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
