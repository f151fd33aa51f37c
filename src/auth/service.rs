// Authentication service: credential checks, registration, token-based identity

use crate::auth::audit_logger::{AuditLogger, AuthEvent};
use crate::auth::password::{Password, PasswordHasher};
use crate::core::crypto::TokenService;
use crate::core::errors::EventsError;
use crate::core::models::{AccessToken, User};
use crate::state::UserStore;
use chrono::Duration;
use std::sync::Arc;
use tracing::debug;

/// Composes a user store, the password hasher and the token service.
///
/// Holds no state of its own beyond its collaborators.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    audit_logger: AuditLogger,
    access_token_ttl: Duration,
}

impl AuthService {
    /// Default lifetime of tokens handed out by `login`
    pub const DEFAULT_ACCESS_TOKEN_MINUTES: i64 = 30;

    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: Arc<TokenService>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            audit_logger: AuditLogger::new(),
            access_token_ttl: Duration::minutes(Self::DEFAULT_ACCESS_TOKEN_MINUTES),
        }
    }

    /// Override the lifetime of tokens issued by `login`
    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    pub fn token_service(&self) -> &TokenService {
        &self.tokens
    }

    /// Check an email/password pair.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub fn authenticate(&self, email: &str, password: &Password) -> Result<User, EventsError> {
        let user = match self.users.get_user_by_email(email) {
            Some(user) => user,
            None => {
                self.audit_logger.log_auth_event(&AuthEvent::LoginFailure, Some(email));
                return Err(EventsError::InvalidCredentials);
            }
        };

        // A missing credential record verifies against "" and fails
        let stored_hash = self.users.credential_hash(email).unwrap_or_default();
        if !self.hasher.verify(password, &stored_hash) {
            self.audit_logger.log_auth_event(&AuthEvent::LoginFailure, Some(email));
            return Err(EventsError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Authenticate and issue an access token with the configured lifetime
    pub fn login(&self, email: &str, password: &Password) -> Result<AccessToken, EventsError> {
        let user = self.authenticate(email, password)?;
        let token = self.tokens.issue(&user.email, Some(self.access_token_ttl))?;
        self.audit_logger
            .log_auth_event(&AuthEvent::LoginSuccess { user_id: user.id }, Some(&user.email));
        Ok(AccessToken::bearer(token))
    }

    /// Register a new user. Fails with `Duplicate` when the email is taken.
    pub fn register(&self, email: &str, username: &str, password: &Password) -> Result<User, EventsError> {
        match self.users.create_user(email, username, password) {
            Ok(user) => {
                self.audit_logger
                    .log_auth_event(&AuthEvent::Registered { user_id: user.id }, Some(email));
                Ok(user)
            }
            Err(e) => {
                self.audit_logger.log_auth_event(
                    &AuthEvent::RegistrationRejected { reason: e.to_string() },
                    Some(email),
                );
                Err(e)
            }
        }
    }

    /// Resolve the user behind a bearer token
    pub fn resolve_current_user(&self, token: &str) -> Result<User, EventsError> {
        let claims = self.tokens.verify(token).map_err(|e| {
            self.audit_logger
                .log_auth_event(&AuthEvent::TokenRejected { reason: e.to_string() }, None);
            EventsError::Unauthenticated(e.to_string())
        })?;

        match self.users.get_user_by_email(&claims.sub) {
            Some(user) => {
                debug!(user_id = user.id, "Resolved token subject");
                Ok(user)
            }
            None => {
                self.audit_logger.log_auth_event(
                    &AuthEvent::TokenRejected { reason: "Unknown subject".to_string() },
                    Some(&claims.sub),
                );
                Err(EventsError::Unauthenticated("Unknown subject".to_string()))
            }
        }
    }
}
