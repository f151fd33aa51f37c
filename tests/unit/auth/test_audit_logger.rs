// Unit tests for audit logging

use tokyo_weekend_events::auth::audit_logger::{AuditLogger, AuthEvent};

#[test]
fn test_event_type_names() {
    assert_eq!(AuthEvent::LoginSuccess { user_id: 1 }.event_type(), "LOGIN_SUCCESS");
    assert_eq!(AuthEvent::LoginFailure.event_type(), "LOGIN_FAILURE");
    assert_eq!(AuthEvent::Registered { user_id: 2 }.event_type(), "REGISTERED");
    assert_eq!(
        AuthEvent::RegistrationRejected { reason: "dup".into() }.event_type(),
        "REGISTRATION_REJECTED"
    );
    assert_eq!(
        AuthEvent::TokenRejected { reason: "expired".into() }.event_type(),
        "TOKEN_REJECTED"
    );
}

#[test]
fn test_logging_without_subscriber_is_silent() {
    let logger = AuditLogger::new();
    logger.log_auth_event(&AuthEvent::LoginFailure, Some("a@example.com"));
    logger.log_auth_event(&AuthEvent::TokenRejected { reason: "bad".into() }, None);
}
