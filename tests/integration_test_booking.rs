mod common;

use axum::http::{Method, StatusCode};
use common::{parse_body, AuthHeaders, TestApp};
use serde_json::{json, Value};
use sqlx::Row;

async fn setup(app: &TestApp) -> (AuthHeaders, AuthHeaders, String) {
    app.seed_user("Admin", "admin@test.edu", "secret123", "admin").await;
    app.seed_user("Prof Iyer", "iyer@test.edu", "secret123", "faculty").await;

    let admin = app.login("admin@test.edu", "secret123").await;
    let faculty = app.login("iyer@test.edu", "secret123").await;

    let res = app.request(
        Method::POST,
        "/api/v1/halls",
        Some(json!({"name": "Convocation Hall", "capacity": 500, "total_chairs": 400, "has_projector": true})),
        Some(&admin),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    let hall = parse_body(res).await;

    (admin, faculty, hall["id"].as_str().unwrap().to_string())
}

fn booking_payload(hall_id: &str, date: &str, start: &str, end: &str) -> Value {
    json!({
        "event_name": "Annual Day",
        "booking_date": date,
        "start_time": start,
        "end_time": end,
        "hall_id": hall_id,
        "department": "EEE",
        "expected_audience": 200,
        "chairs_required": 180
    })
}

#[tokio::test]
async fn test_create_booking_success() {
    let app = TestApp::new().await;
    let (_, faculty, hall_id) = setup(&app).await;

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "09:00", "10:00")),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    assert_eq!(body["status"], json!("APPROVED"));
    assert_eq!(body["hall_id"].as_str().unwrap(), hall_id);
    assert_eq!(body["booking_date"], json!("2024-05-01"));
}

#[tokio::test]
async fn test_missing_required_fields_rejected() {
    let app = TestApp::new().await;
    let (_, faculty, _) = setup(&app).await;

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(json!({
            "event_name": "Annual Day",
            "booking_date": "2024-05-01",
            "start_time": "09:00",
            "end_time": "10:00"
        })),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], json!("Please provide all required fields"));
}

#[tokio::test]
async fn test_inverted_and_zero_length_intervals_rejected() {
    let app = TestApp::new().await;
    let (_, faculty, hall_id) = setup(&app).await;

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "11:00", "10:00")),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "10:00", "10:00")),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_conflicting_booking_rejected_with_conflict_set() {
    let app = TestApp::new().await;
    let (_, faculty, hall_id) = setup(&app).await;

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "09:00", "10:00")),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let first = parse_body(res).await;

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "09:30", "10:30")),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let body = parse_body(res).await;
    assert_eq!(body["error"], json!("Time slot conflict detected"));
    let conflicts = body["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["id"], first["id"]);
}

#[tokio::test]
async fn test_touching_booking_accepted() {
    let app = TestApp::new().await;
    let (_, faculty, hall_id) = setup(&app).await;

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "09:00", "10:00")),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "10:00", "11:00")),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_chair_request_exceeding_inventory_rejected() {
    let app = TestApp::new().await;
    let (_, faculty, hall_id) = setup(&app).await;

    let mut payload = booking_payload(&hall_id, "2024-05-01", "09:00", "10:00");
    payload["chairs_required"] = json!(500);

    let res = app.request(Method::POST, "/api/v1/bookings", Some(payload), Some(&faculty)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = parse_body(res).await;
    assert_eq!(body["error"], json!("Requested chairs (500) exceed hall capacity (400)"));
}

#[tokio::test]
async fn test_unknown_hall_rejected() {
    let app = TestApp::new().await;
    let (_, faculty, _) = setup(&app).await;

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload("no-such-hall", "2024-05-01", "09:00", "10:00")),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_requires_authentication() {
    let app = TestApp::new().await;
    let (_, _, hall_id) = setup(&app).await;

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "09:00", "10:00")),
        None,
    ).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_confirmation_job_enqueued_with_booking() {
    let app = TestApp::new().await;
    let (_, faculty, hall_id) = setup(&app).await;

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "09:00", "10:00")),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let rows = sqlx::query("SELECT job_type FROM jobs")
        .fetch_all(&app.pool)
        .await
        .unwrap();
    let types: Vec<String> = rows.iter().map(|r| r.get::<String, _>("job_type")).collect();
    assert_eq!(types, vec!["CONFIRMATION".to_string()]);
}

#[tokio::test]
async fn test_rejected_booking_does_not_write_anything() {
    let app = TestApp::new().await;
    let (_, faculty, hall_id) = setup(&app).await;

    app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "09:00", "10:00")),
        Some(&faculty),
    ).await;

    // Conflicting attempt: no booking row, no extra job rows.
    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "09:00", "09:30")),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let bookings = sqlx::query("SELECT COUNT(*) as count FROM bookings")
        .fetch_one(&app.pool).await.unwrap()
        .get::<i64, _>("count");
    assert_eq!(bookings, 1);

    let jobs = sqlx::query("SELECT COUNT(*) as count FROM jobs")
        .fetch_one(&app.pool).await.unwrap()
        .get::<i64, _>("count");
    assert_eq!(jobs, 1);
}

#[tokio::test]
async fn test_update_booking_regated_through_resolver() {
    let app = TestApp::new().await;
    let (_, faculty, hall_id) = setup(&app).await;

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "09:00", "10:00")),
        Some(&faculty),
    ).await;
    let first = parse_body(res).await;

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "11:00", "12:00")),
        Some(&faculty),
    ).await;
    let second = parse_body(res).await;
    let second_id = second["id"].as_str().unwrap();

    // Moving the second booking onto the first one must fail.
    let res = app.request(
        Method::PUT,
        &format!("/api/v1/bookings/{}", second_id),
        Some(json!({"start_time": "09:30", "end_time": "10:30"})),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["conflicts"][0]["id"], first["id"]);

    // Moving it to a free slot works, and re-saving its own slot is not a
    // self-conflict.
    let res = app.request(
        Method::PUT,
        &format!("/api/v1/bookings/{}", second_id),
        Some(json!({"start_time": "10:00", "end_time": "11:00"})),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request(
        Method::PUT,
        &format!("/api/v1/bookings/{}", second_id),
        Some(json!({"event_name": "Renamed Event"})),
        Some(&faculty),
    ).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["event_name"], json!("Renamed Event"));
}

#[tokio::test]
async fn test_update_foreign_booking_forbidden() {
    let app = TestApp::new().await;
    let (_, faculty, hall_id) = setup(&app).await;
    app.seed_user("Prof Menon", "menon@test.edu", "secret123", "faculty").await;
    let other = app.login("menon@test.edu", "secret123").await;

    let res = app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "09:00", "10:00")),
        Some(&faculty),
    ).await;
    let booking = parse_body(res).await;
    let booking_id = booking["id"].as_str().unwrap();

    let res = app.request(
        Method::PUT,
        &format!("/api/v1/bookings/{}", booking_id),
        Some(json!({"event_name": "Hijacked"})),
        Some(&other),
    ).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_my_bookings_and_date_listing() {
    let app = TestApp::new().await;
    let (_, faculty, hall_id) = setup(&app).await;
    app.seed_user("Prof Menon", "menon@test.edu", "secret123", "faculty").await;
    let other = app.login("menon@test.edu", "secret123").await;

    app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "09:00", "10:00")),
        Some(&faculty),
    ).await;
    app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-01", "14:00", "15:00")),
        Some(&other),
    ).await;
    app.request(
        Method::POST,
        "/api/v1/bookings",
        Some(booking_payload(&hall_id, "2024-05-02", "09:00", "10:00")),
        Some(&faculty),
    ).await;

    let res = app.request(Method::GET, "/api/v1/bookings/my", None, Some(&faculty)).await;
    let body = parse_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Day listing is ordered by start time and spans all requesters.
    let res = app.request(Method::GET, "/api/v1/bookings/date/2024-05-01", None, Some(&faculty)).await;
    let body = parse_body(res).await;
    let day = body.as_array().unwrap();
    assert_eq!(day.len(), 2);
    assert_eq!(day[0]["start_time"], json!("09:00:00"));
    assert_eq!(day[1]["start_time"], json!("14:00:00"));
}
