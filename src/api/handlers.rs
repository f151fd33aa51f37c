// Request handlers for API endpoints

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    Extension, Form,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::api::responses::{ApiError, HealthResponse, MessageResponse};
use crate::api::AppState;
use crate::auth::password::Password;
use crate::core::errors::EventsError;
use crate::core::models::{
    AccessToken, Event, EventFilter, Favorite, NearbyPlace, RouteOption, Schedule, User,
};
use crate::engine::route_planner::{parse_transport_types, suggest_routes, DEFAULT_TRANSPORT_TYPES};

/// Query parameters for `GET /events`
#[derive(Debug, Default, Deserialize)]
pub struct EventQuery {
    pub area: Option<String>,
    pub station: Option<String>,
    /// YYYY-MM-DD
    pub start_date: Option<String>,
    /// YYYY-MM-DD
    pub end_date: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub from_lat: f64,
    pub from_lng: f64,
    pub transport_types: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub place_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    #[serde(default)]
    pub reminder: bool,
}

/// Form body for `POST /token`. `username` carries the email.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: Password,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: Password,
}

/// Extract request ID from headers or generate a fresh UUID
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Parse a YYYY-MM-DD date as UTC midnight
pub fn parse_date(field: &str, value: &str) -> Result<DateTime<Utc>, EventsError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            EventsError::ValidationError(format!("Invalid {} format. Use YYYY-MM-DD", field))
        })
}

impl EventQuery {
    /// Convert query parameters into a store filter
    pub fn into_filter(self) -> Result<EventFilter, EventsError> {
        let start_after = match self.start_date.as_deref().filter(|s| !s.is_empty()) {
            Some(value) => Some(parse_date("start_date", value)?),
            None => None,
        };
        let end_before = match self.end_date.as_deref().filter(|s| !s.is_empty()) {
            Some(value) => Some(parse_date("end_date", value)?),
            None => None,
        };

        Ok(EventFilter {
            area: self.area,
            station: self.station,
            start_after,
            end_before,
            category: self.category,
        })
    }
}

/// GET /
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to Tokyo Weekend Events API".to_string(),
    })
}

/// Health check handler
///
/// GET /health
pub async fn health_handler(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        events: app_state.store.event_count(),
        users: app_state.store.user_count(),
    })
}

/// GET /events
pub async fn list_events_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<EventQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let filter = query
        .into_filter()
        .map_err(|e| ApiError::from_events_error_with_id(e, request_id(&headers)))?;

    let events = app_state.store.filter_events(&filter);
    debug!(count = events.len(), "Filtered events");
    Ok(Json(events))
}

/// GET /events/search
pub async fn search_events_handler(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Event>> {
    let events = app_state.store.search_events(&query.query);
    debug!(query = %query.query, count = events.len(), "Searched events");
    Json(events)
}

/// GET /events/:event_id
pub async fn get_event_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<u64>,
) -> Result<Json<Event>, ApiError> {
    app_state
        .store
        .get_event_by_id(event_id)
        .map(Json)
        .map_err(|e| ApiError::from_events_error_with_id(e, request_id(&headers)))
}

/// GET /events/:event_id/routes
///
/// The starting point is accepted but does not influence the canned suggestions.
pub async fn routes_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<u64>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<Vec<RouteOption>>, ApiError> {
    let event = app_state
        .store
        .get_event_by_id(event_id)
        .map_err(|e| ApiError::from_events_error_with_id(e, request_id(&headers)))?;

    let modes = parse_transport_types(
        query.transport_types.as_deref().unwrap_or(DEFAULT_TRANSPORT_TYPES),
    );
    debug!(
        event_id,
        from_lat = query.from_lat,
        from_lng = query.from_lng,
        modes = modes.len(),
        "Suggesting routes"
    );
    Ok(Json(suggest_routes(&event, &modes)))
}

/// GET /nearby/:area
pub async fn nearby_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Path(area): Path<String>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Vec<NearbyPlace>>, ApiError> {
    let places = app_state
        .store
        .get_nearby_places(Some(&area), query.place_type.as_deref());
    if places.is_empty() {
        return Err(ApiError::with_request_id(
            StatusCode::NOT_FOUND,
            format!("No places found in {}", area),
            request_id(&headers),
        ));
    }
    Ok(Json(places))
}

/// Login handler
///
/// POST /token (form-encoded `username` and `password`)
pub async fn login_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Json<AccessToken>, ApiError> {
    let token = app_state
        .auth_service
        .login(&form.username, &form.password)
        .map_err(|e| ApiError::from_events_error_with_id(e, request_id(&headers)))?;
    Ok(Json(token))
}

/// Registration handler
///
/// POST /users/register
pub async fn register_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<User>, ApiError> {
    let request_id = request_id(&headers);

    validate_registration(&request)
        .map_err(|e| ApiError::from_events_error_with_id(e, request_id.clone()))?;

    let user = app_state
        .auth_service
        .register(&request.email, &request.username, &request.password)
        .map_err(|e| {
            warn!(request_id = %request_id, error = %e, "Registration failed");
            ApiError::from_events_error_with_id(e, request_id.clone())
        })?;

    info!(user_id = user.id, request_id = %request_id, "User registered");
    Ok(Json(user))
}

fn validate_registration(request: &RegisterRequest) -> Result<(), EventsError> {
    if !request.email.contains('@') {
        return Err(EventsError::ValidationError("Invalid email address".to_string()));
    }
    if request.username.trim().is_empty() {
        return Err(EventsError::ValidationError("Username must not be empty".to_string()));
    }
    if request.password.is_empty() {
        return Err(EventsError::ValidationError("Password must not be empty".to_string()));
    }
    Ok(())
}

/// GET /users/me
pub async fn me_handler(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}

/// GET /users/favorites
pub async fn favorites_handler(
    State(app_state): State<AppState>,
    Extension(user): Extension<User>,
) -> Json<Vec<Event>> {
    Json(app_state.store.get_user_favorites(user.id))
}

/// POST /events/:event_id/favorite
pub async fn add_favorite_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Extension(user): Extension<User>,
    Path(event_id): Path<u64>,
) -> Result<Json<Favorite>, ApiError> {
    app_state
        .store
        .get_event_by_id(event_id)
        .map_err(|e| ApiError::from_events_error_with_id(e, request_id(&headers)))?;

    Ok(Json(app_state.store.add_favorite(user.id, event_id)))
}

/// DELETE /events/:event_id/favorite
pub async fn remove_favorite_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Extension(user): Extension<User>,
    Path(event_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let request_id = request_id(&headers);
    app_state
        .store
        .get_event_by_id(event_id)
        .map_err(|e| ApiError::from_events_error_with_id(e, request_id.clone()))?;

    if !app_state.store.remove_favorite(user.id, event_id) {
        return Err(ApiError::from_events_error_with_id(
            EventsError::NotFound("Favorite".to_string()),
            request_id,
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/schedule
pub async fn schedule_handler(
    State(app_state): State<AppState>,
    Extension(user): Extension<User>,
) -> Json<Vec<Event>> {
    Json(app_state.store.get_user_schedule(user.id))
}

/// POST /events/:event_id/schedule
///
/// Re-scheduling an event returns the existing entry; its reminder flag is not updated.
pub async fn add_schedule_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Extension(user): Extension<User>,
    Path(event_id): Path<u64>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Schedule>, ApiError> {
    app_state
        .store
        .get_event_by_id(event_id)
        .map_err(|e| ApiError::from_events_error_with_id(e, request_id(&headers)))?;

    Ok(Json(app_state.store.add_to_schedule(user.id, event_id, query.reminder)))
}

/// DELETE /events/:event_id/schedule
pub async fn remove_schedule_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Extension(user): Extension<User>,
    Path(event_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let request_id = request_id(&headers);
    app_state
        .store
        .get_event_by_id(event_id)
        .map_err(|e| ApiError::from_events_error_with_id(e, request_id.clone()))?;

    if !app_state.store.remove_from_schedule(user.id, event_id) {
        return Err(ApiError::from_events_error_with_id(
            EventsError::NotFound("Schedule".to_string()),
            request_id,
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}
