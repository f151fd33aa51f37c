// Response types for API endpoints

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::core::errors::EventsError;

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub events: usize,
    pub users: usize,
}

/// Plain message body, used by the root endpoint
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// API error type that converts domain errors to HTTP responses
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub request_id: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            request_id: None,
        }
    }

    /// Create a new API error with request ID
    pub fn with_request_id(status: StatusCode, message: String, request_id: String) -> Self {
        Self {
            status,
            message,
            request_id: Some(request_id),
        }
    }

    /// Create from EventsError
    pub fn from_events_error(err: EventsError) -> Self {
        Self {
            status: status_for(&err),
            message: err.user_message(),
            request_id: None,
        }
    }

    /// Create from EventsError with request ID
    pub fn from_events_error_with_id(err: EventsError, request_id: String) -> Self {
        Self {
            request_id: Some(request_id),
            ..Self::from_events_error(err)
        }
    }
}

/// HTTP status for a domain error
pub fn status_for(err: &EventsError) -> StatusCode {
    match err {
        EventsError::NotFound(_) => StatusCode::NOT_FOUND,
        EventsError::Duplicate(_) => StatusCode::CONFLICT,
        EventsError::Unauthenticated(_) | EventsError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        EventsError::ValidationError(_) => StatusCode::BAD_REQUEST,
        EventsError::CryptoError(_) | EventsError::ConfigurationError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = Json(ErrorResponse {
            error: self.message,
            request_id: self.request_id,
        });
        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<EventsError> for ApiError {
    fn from(err: EventsError) -> Self {
        ApiError::from_events_error(err)
    }
}
