// Axum web server layer

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::{get, post},
    BoxError, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;

pub mod handlers;
pub mod middleware;
pub mod responses;

use crate::auth::auth_middleware::{auth_middleware, AuthState};
use crate::auth::service::AuthService;
use crate::state::memory_store::InMemoryStore;

// Re-export Config from config module
pub use crate::config::Config;

/// Application state containing all shared dependencies
///
/// All components are wrapped in Arc for shared ownership across async tasks.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryStore>,
    pub auth_service: Arc<AuthService>,
    pub config: Arc<Config>,
}

/// Create the Axum router with all routes and middleware
///
/// Middleware stack (outermost to innermost):
/// - Tracing middleware (tower-http::trace)
/// - Request timeout (tower::timeout), 408 on elapse
/// - Body size limit (tower-http::limit)
/// - Auth middleware, protected routes only
pub fn create_router(app_state: AppState, auth_state: Arc<AuthState>) -> Router {
    let protected = Router::new()
        .route("/users/me", get(handlers::me_handler))
        .route("/users/favorites", get(handlers::favorites_handler))
        .route("/users/schedule", get(handlers::schedule_handler))
        .route(
            "/events/:event_id/favorite",
            post(handlers::add_favorite_handler).delete(handlers::remove_favorite_handler),
        )
        .route(
            "/events/:event_id/schedule",
            post(handlers::add_schedule_handler).delete(handlers::remove_schedule_handler),
        )
        .route_layer(axum::middleware::from_fn_with_state(auth_state, auth_middleware));

    let public = Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/events", get(handlers::list_events_handler))
        .route("/events/search", get(handlers::search_events_handler))
        .route("/events/:event_id", get(handlers::get_event_handler))
        .route("/events/:event_id/routes", get(handlers::routes_handler))
        .route("/nearby/:area", get(handlers::nearby_handler))
        .route("/token", post(handlers::login_handler))
        .route("/users/register", post(handlers::register_handler));

    let body_limit = app_state.config.body_size_limit_bytes;
    let timeout_secs = app_state.config.request_timeout_secs;

    // HandleErrorLayer must come before the timeout to catch its error
    let middleware_stack = ServiceBuilder::new()
        .layer(middleware::tracing_layer())
        .layer(HandleErrorLayer::new(|e: BoxError| async move {
            let status = if e.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string())
        }))
        .layer(middleware::timeout_layer(Duration::from_secs(timeout_secs)))
        .layer(middleware::body_size_limit_layer(body_limit));

    public
        .merge(protected)
        .layer(middleware_stack)
        .with_state(app_state)
}

/// Build the auth middleware state from the application state
pub fn auth_state(app_state: &AppState) -> Arc<AuthState> {
    Arc::new(AuthState {
        auth_service: Arc::clone(&app_state.auth_service),
    })
}
