// Unit tests for API error responses

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use tokyo_weekend_events::api::responses::ApiError;
use tokyo_weekend_events::core::errors::{CryptoError, EventsError};

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_not_found_body() {
    let (status, body) = body_json(EventsError::NotFound("Event".into()).into()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({"error": "Event not found"}));
}

#[tokio::test]
async fn test_request_id_included_when_known() {
    let error = ApiError::from_events_error_with_id(
        EventsError::ValidationError("Invalid start_date format. Use YYYY-MM-DD".into()),
        "req-42".into(),
    );
    let (status, body) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["request_id"], "req-42");
    assert_eq!(body["error"], "Invalid start_date format. Use YYYY-MM-DD");
}

#[tokio::test]
async fn test_internal_errors_do_not_leak_detail() {
    let error: ApiError = EventsError::CryptoError(CryptoError::SigningError("key bytes".into())).into();
    let (status, body) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal error");
}

#[test]
fn test_invalid_credentials_challenge() {
    let response = ApiError::from(EventsError::InvalidCredentials).into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
}

#[test]
fn test_duplicate_is_conflict() {
    let response = ApiError::from(EventsError::Duplicate("Email".into())).into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
