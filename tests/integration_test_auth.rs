mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{parse_body, TestApp};
use serde_json::json;
use tower::ServiceExt;

fn cookie_value(cookies: &[String], name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    cookies.iter().find(|c| c.starts_with(&prefix)).map(|c| {
        let start = prefix.len();
        let end = c[start..].find(';').unwrap_or(c.len() - start);
        c[start..start + end].to_string()
    })
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = TestApp::new().await;
    app.seed_user("Prof Sen", "sen@test.edu", "secret123", "faculty").await;

    let res = app.request(
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({"email": "sen@test.edu", "password": "wrong"})),
        None,
    ).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app.request(
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({"email": "nobody@test.edu", "password": "secret123"})),
        None,
    ).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mutating_request_requires_csrf_token() {
    let app = TestApp::new().await;
    app.seed_user("Admin", "admin@test.edu", "secret123", "admin").await;
    let auth = app.login("admin@test.edu", "secret123").await;

    // Cookie alone is enough for reads...
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri("/api/v1/halls")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // ...but not for writes.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/halls")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"name": "H", "capacity": 1, "total_chairs": 1}).to_string()))
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_refresh_rotates_token() {
    let app = TestApp::new().await;
    app.seed_user("Prof Sen", "sen@test.edu", "secret123", "faculty").await;

    let login_res = app.request(
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({"email": "sen@test.edu", "password": "secret123"})),
        None,
    ).await;
    assert_eq!(login_res.status(), StatusCode::OK);

    let cookies: Vec<String> = login_res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|h| h.to_str().unwrap().to_string())
        .collect();
    let refresh_token = cookie_value(&cookies, "refresh_token").expect("No refresh cookie");

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/auth/refresh")
            .header(header::COOKIE, format!("refresh_token={}", refresh_token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert!(body["csrf_token"].is_string());

    // The spent refresh token cannot be replayed.
    let res = app.router.clone().oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/v1/auth/refresh")
            .header(header::COOKIE, format!("refresh_token={}", refresh_token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_member_management_requires_admin() {
    let app = TestApp::new().await;
    app.seed_user("Admin", "admin@test.edu", "secret123", "admin").await;
    app.seed_user("Prof Sen", "sen@test.edu", "secret123", "faculty").await;

    let admin = app.login("admin@test.edu", "secret123").await;
    let faculty = app.login("sen@test.edu", "secret123").await;

    let res = app.request(
        Method::POST,
        "/api/v1/members",
        Some(json!({"name": "New Prof", "email": "new@test.edu", "password": "hunter22"})),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.request(
        Method::POST,
        "/api/v1/members",
        Some(json!({"name": "New Prof", "email": "new@test.edu", "password": "hunter22", "department": "Physics"})),
        Some(&admin),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["role"], json!("faculty"));
    assert!(body.get("password_hash").is_none());

    // The new member can log in.
    app.login("new@test.edu", "hunter22").await;

    // Duplicate email rejected.
    let res = app.request(
        Method::POST,
        "/api/v1/members",
        Some(json!({"name": "Dup", "email": "new@test.edu", "password": "hunter22"})),
        Some(&admin),
    ).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}
