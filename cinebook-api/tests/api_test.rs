use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use futures_util::StreamExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use cinebook_api::{app, AppState};
use cinebook_catalog::{default_catalog, SEAT_COUNT};
use cinebook_store::{app_config::BookingConfig, LocalBookingBackend};

fn test_app() -> Router {
    let backend = LocalBookingBackend::from_catalog(&default_catalog(), SEAT_COUNT).unwrap();
    app(AppState::new(Arc::new(backend), &BookingConfig::default()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn send_raw(app: &Router, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_showtimes_start_fully_available() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/showtimes", None).await;
    assert_eq!(status, StatusCode::OK);

    let showtimes = body.as_array().unwrap();
    assert_eq!(showtimes.len(), 2);
    for showtime in showtimes {
        let seats = showtime["seats"].as_object().unwrap();
        assert_eq!(seats.len(), 50);
        assert!(seats.values().all(|v| v == &json!(true)));
    }
    assert_eq!(showtimes[0]["id"], "Showtime 1");
    assert_eq!(showtimes[0]["movie"], "Movie 1");
}

#[tokio::test]
async fn test_book_and_delete_flow() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/book-seat",
        Some(json!({"showtime": "Showtime 1", "seat": "A1", "name": "Alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Seat A1 for Movie 1 successfully booked by Alice!");
    assert_eq!(body["movie"], "Movie 1");

    let (_, showtimes) = send(&app, "GET", "/showtimes", None).await;
    assert_eq!(showtimes[0]["seats"]["A1"], false);
    assert_eq!(showtimes[0]["sold_tickets"], 1);

    let (_, history) = send(&app, "GET", "/history", None).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["showtime"], "Showtime 1");
    assert_eq!(history[0]["seat"], "A1");
    assert_eq!(history[0]["name"], "Alice");

    let (status, body) = send(&app, "POST", "/delete-booking", Some(json!({"index": 0}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["booking"]["name"], "Alice");

    let (_, showtimes) = send(&app, "GET", "/showtimes", None).await;
    assert_eq!(showtimes[0]["seats"]["A1"], true);
    let (_, history) = send(&app, "GET", "/history", None).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_double_booking_conflict() {
    let app = test_app();
    let booking = |name: &str| json!({"showtime": "Showtime 2", "seat": "B5", "name": name});

    let (status, _) = send(&app, "POST", "/book-seat", Some(booking("Bob"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/book-seat", Some(booking("Carol"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["kind"], "seat_unavailable");

    let (_, history) = send(&app, "GET", "/history", None).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["name"], "Bob");
}

#[tokio::test]
async fn test_missing_name_rejected() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/book-seat",
        Some(json!({"showtime": "Showtime 1", "seat": "C3"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "missing_name");

    let (_, showtimes) = send(&app, "GET", "/showtimes", None).await;
    assert_eq!(showtimes[0]["seats"]["C3"], true);
}

#[tokio::test]
async fn test_unknown_seat_and_showtime() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/book-seat",
        Some(json!({"showtime": "Showtime 1", "seat": "K1", "name": "Alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "unknown_seat");

    let (status, body) = send(
        &app,
        "POST",
        "/book-seat",
        Some(json!({"showtime": "Midnight", "seat": "A1", "name": "Alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "unknown_showtime");
}

#[tokio::test]
async fn test_delete_out_of_range() {
    let app = test_app();

    let (status, body) = send(&app, "POST", "/delete-booking", Some(json!({"index": 3}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["kind"], "index_out_of_range");
    assert_eq!(body["error"]["detail"]["len"], 0);
}

#[tokio::test]
async fn test_delete_by_id() {
    let app = test_app();

    let (_, first) = send(
        &app,
        "POST",
        "/book-seat",
        Some(json!({"showtime": "Showtime 1", "seat": "D1", "name": "Dewi"})),
    )
    .await;
    let (_, second) = send(
        &app,
        "POST",
        "/book-seat",
        Some(json!({"showtime": "Showtime 1", "seat": "D2", "name": "Eko"})),
    )
    .await;

    let id = second["booking_id"].as_u64().unwrap();
    let (status, body) = send(&app, "DELETE", &format!("/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booking"]["name"], "Eko");

    let (status, body) = send(&app, "DELETE", &format!("/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["kind"], "unknown_booking");

    let (_, history) = send(&app, "GET", "/history", None).await;
    assert_eq!(history[0]["id"], first["booking_id"]);
}

#[tokio::test]
async fn test_mutations_are_announced() {
    let backend = LocalBookingBackend::from_catalog(&default_catalog(), SEAT_COUNT).unwrap();
    let state = AppState::new(Arc::new(backend), &BookingConfig::default());
    let mut events = state.events_tx.subscribe();
    let app = app(state);

    send(
        &app,
        "POST",
        "/book-seat",
        Some(json!({"showtime": "Showtime 1", "seat": "B2", "name": "Budi"})),
    )
    .await;
    send(&app, "POST", "/delete-booking", Some(json!({"index": 0}))).await;

    assert_eq!(events.recv().await.unwrap().name(), "seat_booked");
    assert_eq!(events.recv().await.unwrap().name(), "booking_deleted");
}

#[tokio::test]
async fn test_events_stream_over_http() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/event-stream");
    let mut body = response.into_body().into_data_stream();

    send(
        &app,
        "POST",
        "/book-seat",
        Some(json!({"showtime": "Showtime 1", "seat": "C7", "name": "Citra"})),
    )
    .await;

    let mut frame = String::new();
    while !frame.contains("\n\n") {
        let chunk = tokio::time::timeout(Duration::from_secs(5), body.next())
            .await
            .expect("no event within 5s")
            .unwrap()
            .unwrap();
        frame.push_str(std::str::from_utf8(&chunk).unwrap());
    }

    assert!(frame.contains("event: seat_booked"), "unexpected frame: {frame}");
    let data = frame.lines().find_map(|line| line.strip_prefix("data: ")).unwrap();
    let event: Value = serde_json::from_str(data).unwrap();
    assert_eq!(event["type"], "seat_booked");
    assert_eq!(event["showtime"], "Showtime 1");
    assert_eq!(event["seat"], "C7");
    assert!(!frame.contains("Citra"));
}

#[tokio::test]
async fn test_bad_request_bodies_get_json_errors() {
    let app = test_app();

    let (status, body) = send(&app, "POST", "/delete-booking", Some(json!({"index": -1}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));

    let (status, body) = send(&app, "POST", "/delete-booking", Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");

    let (status, body) = send_raw(&app, "/delete-booking", "application/json", "{index: 0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (status, body) = send_raw(&app, "/book-seat", "text/plain", "A1").await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["status"], "error");
    assert!(body.get("error").is_none());
}
