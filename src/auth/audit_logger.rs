// Security event logging

use tracing::{info, warn};

/// Authentication event type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoginSuccess { user_id: u64 },
    LoginFailure,
    Registered { user_id: u64 },
    RegistrationRejected { reason: String },
    TokenRejected { reason: String },
}

impl AuthEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            AuthEvent::LoginSuccess { .. } => "LOGIN_SUCCESS",
            AuthEvent::LoginFailure => "LOGIN_FAILURE",
            AuthEvent::Registered { .. } => "REGISTERED",
            AuthEvent::RegistrationRejected { .. } => "REGISTRATION_REJECTED",
            AuthEvent::TokenRejected { .. } => "TOKEN_REJECTED",
        }
    }
}

/// Audit logger for security events
///
/// Emits structured `tracing` records only. Emails are logged for the
/// operator; passwords and tokens never are.
#[derive(Debug, Default)]
pub struct AuditLogger;

impl AuditLogger {
    pub fn new() -> Self {
        Self
    }

    pub fn log_auth_event(&self, event: &AuthEvent, email: Option<&str>) {
        let event_type = event.event_type();
        match event {
            AuthEvent::LoginSuccess { user_id } | AuthEvent::Registered { user_id } => {
                info!(event_type, user_id, email = ?email, "Authentication event");
            }
            AuthEvent::LoginFailure => {
                warn!(event_type, email = ?email, "Authentication failed");
            }
            AuthEvent::RegistrationRejected { reason } | AuthEvent::TokenRejected { reason } => {
                warn!(event_type, email = ?email, reason = %reason, "Authentication rejected");
            }
        }
    }
}
