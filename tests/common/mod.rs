// Common test utilities and helpers for all test modules
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use jsonwebtoken::Algorithm;
use secrecy::SecretString;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use tokyo_weekend_events::api::{auth_state, create_router, AppState};
use tokyo_weekend_events::auth::password::{Password, PasswordHasher};
use tokyo_weekend_events::auth::service::AuthService;
use tokyo_weekend_events::config::Config;
use tokyo_weekend_events::core::crypto::TokenService;
use tokyo_weekend_events::core::errors::EventsError;
use tokyo_weekend_events::core::models::User;
use tokyo_weekend_events::loader::seed::seeded_store;
use tokyo_weekend_events::state::memory_store::InMemoryStore;
use tokyo_weekend_events::state::UserStore;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789";
pub const DEMO_EMAIL: &str = "test@example.com";
pub const DEMO_PASSWORD: &str = "password123";

/// Argon2 hasher with the smallest sensible cost
pub fn test_hasher() -> PasswordHasher {
    PasswordHasher::with_cost(1024, 1).unwrap()
}

/// Fresh store loaded with the seed catalogue and demo user
pub fn seeded() -> InMemoryStore {
    seeded_store(test_hasher()).unwrap()
}

pub fn test_token_service() -> TokenService {
    TokenService::new(&SecretString::new(TEST_SECRET.to_string()), Algorithm::HS256).unwrap()
}

pub fn test_auth_service(users: Arc<dyn UserStore>) -> AuthService {
    AuthService::new(users, test_hasher(), Arc::new(test_token_service()))
}

/// Application state over a freshly seeded store
pub fn test_app_state() -> AppState {
    let store = Arc::new(seeded());
    let auth_service = Arc::new(test_auth_service(store.clone()));
    AppState {
        store,
        auth_service,
        config: Arc::new(Config::test_config()),
    }
}

/// Router plus the state behind it, for inspecting the store after requests
pub fn test_app() -> (Router, AppState) {
    let app_state = test_app_state();
    let router = create_router(app_state.clone(), auth_state(&app_state));
    (router, app_state)
}

/// Send one request through a clone of the router
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={}&password={}", email, password)))
        .unwrap()
}

pub fn register_request(email: &str, username: &str, password: &str) -> Request<Body> {
    let body = serde_json::json!({
        "email": email,
        "username": username,
        "password": password,
    });
    Request::builder()
        .method("POST")
        .uri("/users/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Log in through the router and return the access token
pub async fn login_token(app: &Router, email: &str, password: &str) -> String {
    let response = send(app, login_request(email, password)).await;
    let body = json_body(response).await;
    body["access_token"].as_str().unwrap().to_string()
}

/// Mock UserStore for exercising the auth service in isolation
#[derive(Default)]
pub struct MockUserStore {
    pub users: Mutex<Vec<User>>,
    /// When false, `credential_hash` reports no record for any email
    pub has_credentials: bool,
    pub hash: Mutex<Option<String>>,
}

impl MockUserStore {
    /// Store holding a single user with a credential record for `password`
    pub fn with_user(email: &str, password: &str) -> Self {
        let hash = test_hasher().hash(&Password::new(password)).unwrap();
        Self {
            users: Mutex::new(vec![User {
                id: 7,
                username: "mock".to_string(),
                email: email.to_string(),
                is_active: true,
            }]),
            has_credentials: true,
            hash: Mutex::new(Some(hash)),
        }
    }

    /// Same as `with_user` but the credential record is missing
    pub fn without_credentials(email: &str) -> Self {
        Self {
            has_credentials: false,
            ..Self::with_user(email, "irrelevant")
        }
    }

    /// Drop every user, keeping nothing behind
    pub fn forget_all(&self) {
        self.users.lock().unwrap().clear();
    }
}

impl UserStore for MockUserStore {
    fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.email == email).cloned()
    }

    fn credential_hash(&self, _email: &str) -> Option<String> {
        if self.has_credentials {
            self.hash.lock().unwrap().clone()
        } else {
            None
        }
    }

    fn create_user(&self, email: &str, username: &str, _password: &Password) -> Result<User, EventsError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(EventsError::Duplicate("Email".to_string()));
        }
        let user = User {
            id: users.len() as u64 + 1,
            username: username.to_string(),
            email: email.to_string(),
            is_active: true,
        };
        users.push(user.clone());
        Ok(user)
    }
}
