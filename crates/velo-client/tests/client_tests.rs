// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP-level tests for the booking API client against a wiremock backend.

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use velo_client::ApiClient;
use velo_core::model::{CancelBookingRequest, CreateBookingRequest};
use velo_core::types::{DayOfWeek, Role};
use velo_core::{BookingApi, BookingStatus, UserSession, VeloError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session(token: Option<&str>) -> UserSession {
    UserSession {
        token: token.map(str::to_string),
        ..UserSession::anonymous(Role::Parent)
    }
}

fn test_client(server: &MockServer, token: Option<&str>, max_retries: u32) -> ApiClient {
    ApiClient::new(
        &format!("{}/api", server.uri()),
        &session(token),
        Duration::from_secs(5),
        max_retries,
    )
    .unwrap()
    .with_retry_delay(Duration::from_millis(10))
}

fn booking_json(id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "userId": 1,
        "userName": "Pat",
        "playerName": null,
        "sessionTypeOptionId": 10,
        "sessionTypeName": "Hitting Lesson",
        "sessionTypeOptionName": "Single",
        "trainerId": 5,
        "trainerName": "Coach A",
        "scheduledAt": "2030-01-07T09:00:00",
        "durationMinutes": 60,
        "status": status,
        "pricePaid": 50.0,
        "notes": null,
        "createdAt": "2029-12-01T12:00:00.123456",
        "updatedAt": "2029-12-01T12:00:00.123456",
        "cancellationReason": null
    })
}

#[tokio::test]
async fn sends_bearer_token_and_decodes_session_types() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session-types"))
        .and(header("authorization", "Bearer t0k3n"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "Hitting Lesson",
            "description": null,
            "durationMinutes": 60,
            "isActive": true,
            "options": [{
                "id": 10,
                "sessionTypeId": 1,
                "sessionTypeName": "Hitting Lesson",
                "name": "Single",
                "description": null,
                "price": 50,
                "pricingType": "ONE_TIME",
                "billingPeriodDays": null,
                "sessionsPerWeek": null,
                "autoRenew": null,
                "maxParticipants": 1,
                "isActive": true,
                "createdAt": "2029-01-01T00:00:00",
                "updatedAt": "2029-01-01T00:00:00"
            }],
            "createdAt": "2029-01-01T00:00:00",
            "updatedAt": "2029-01-01T00:00:00"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, Some("t0k3n"), 0);
    let types = client.session_types().await.unwrap();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].options[0].id, 10);
    assert_eq!(types[0].options[0].price, 50.0);
}

#[tokio::test]
async fn anonymous_session_sends_no_authorization_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trainers"))
        .respond_with(move |req: &wiremock::Request| {
            if req.headers.contains_key("authorization") {
                ResponseTemplate::new(400)
            } else {
                ResponseTemplate::new(200).set_body_json(json!([
                    {"id": 5, "userId": 9, "name": "Coach A", "bio": null,
                     "sports": ["BASEBALL"], "isActive": true, "imageUrl": null}
                ]))
            }
        })
        .mount(&server)
        .await;

    let client = test_client(&server, None, 0);
    let trainers = client.trainers().await.unwrap();
    assert_eq!(trainers[0].name, "Coach A");
}

#[tokio::test]
async fn availability_times_decode_from_local_time_strings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trainers/5/availability"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "trainerId": 5, "dayOfWeek": "MONDAY", "startTime": "09:00:00",
             "endTime": "12:00:00", "isAvailable": true,
             "createdAt": "2029-01-01T00:00:00", "updatedAt": "2029-01-01T00:00:00"}
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server, Some("t"), 0);
    let windows = client.trainer_availability(5).await.unwrap();
    assert_eq!(windows[0].day_of_week, DayOfWeek::Monday);
    assert_eq!(windows[0].end_time.format("%H:%M").to_string(), "12:00");
}

#[tokio::test]
async fn create_booking_posts_expected_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(body_json(json!({
            "sessionTypeOptionId": 10,
            "trainerId": 5,
            "scheduledAt": "2030-01-07T09:00:00",
            "playerId": 3,
            "notes": "left-handed"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(booking_json(77, "UNPAID")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, Some("t"), 0);
    let booking = client
        .create_booking(&CreateBookingRequest {
            session_type_option_id: 10,
            trainer_id: 5,
            scheduled_at: NaiveDate::from_ymd_opt(2030, 1, 7)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            player_id: Some(3),
            notes: Some("left-handed".into()),
        })
        .await
        .unwrap();
    assert_eq!(booking.id, 77);
    assert_eq!(booking.status, BookingStatus::Unpaid);
}

#[tokio::test]
async fn create_booking_conflict_surfaces_backend_message_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "status": 409,
            "message": "slot no longer available",
            "timestamp": "2030-01-01T10:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, Some("t"), 3);
    let err = client
        .create_booking(&CreateBookingRequest {
            session_type_option_id: 10,
            trainer_id: 5,
            scheduled_at: NaiveDate::from_ymd_opt(2030, 1, 7)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            player_id: None,
            notes: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "slot no longer available");
    assert_eq!(err.status(), Some(409));
}

#[tokio::test]
async fn cancel_sends_reason_with_put() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/bookings/77/cancel"))
        .and(body_json(json!({"reason": "sick"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_json(77, "CANCELLED")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, Some("t"), 0);
    let booking = client
        .cancel_booking(
            77,
            &CancelBookingRequest {
                reason: Some("sick".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn cancel_without_reason_sends_empty_object() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/bookings/78/cancel"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_json(78, "CANCELLED")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, Some("t"), 0);
    client
        .cancel_booking(78, &CancelBookingRequest::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn reads_retry_once_on_503() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/me"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([booking_json(1, "CONFIRMED")])))
        .mount(&server)
        .await;

    let client = test_client(&server, Some("t"), 1);
    let bookings = client.my_bookings().await.unwrap();
    assert_eq!(bookings.len(), 1);
}

#[tokio::test]
async fn reads_give_up_after_max_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/players"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": 500, "message": "database unavailable"
        })))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server, Some("t"), 2);
    let err = client.my_players().await.unwrap_err();
    assert_eq!(err.to_string(), "database unavailable");
}

#[tokio::test]
async fn expired_token_maps_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/subscriptions/me"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, Some("expired"), 2);
    let err = client.my_subscriptions().await.unwrap_err();
    assert!(matches!(err, VeloError::Unauthorized { .. }), "got {err:?}");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server, Some("t"), 0);
    let err = client.booking(5).await.unwrap_err();
    assert!(matches!(err, VeloError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn login_returns_auth_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "pat@example.com", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-123",
            "email": "pat@example.com",
            "name": "Pat",
            "role": "PARENT",
            "userId": 42
        })))
        .mount(&server)
        .await;

    let client = test_client(&server, None, 0);
    let auth = client.login("pat@example.com", "hunter2").await.unwrap();
    let session = UserSession::from(auth);
    assert_eq!(session.role, Role::Parent);
    assert_eq!(session.token.as_deref(), Some("jwt-123"));
}

#[tokio::test]
async fn unreachable_backend_is_retryable_http_error() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = ApiClient::new(
        "http://127.0.0.1:9/api",
        &UserSession::default(),
        Duration::from_secs(2),
        0,
    )
    .unwrap();
    let err = client.trainers().await.unwrap_err();
    assert!(err.is_retryable(), "got {err:?}");
}
