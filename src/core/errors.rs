// Domain error types - explicit failure results, no transport codes

use thiserror::Error;

/// Main error type for the events core
#[derive(Error, Debug)]
pub enum EventsError {
    /// Lookup miss for an event, place, user, favorite or schedule entry
    #[error("{0} not found")]
    NotFound(String),

    /// Logical key already taken (registration with an existing email)
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Missing, invalid or expired token, or the token's user is gone
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    /// Wrong password or unknown email. Both cases share this variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Caller input rejected before reaching the store
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Cryptographic error
    #[error("Cryptographic error: {0}")]
    CryptoError(#[from] CryptoError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Cryptographic operation errors
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Failed to hash a password
    #[error("Failed to hash password: {0}")]
    HashingError(String),

    /// Failed to sign token
    #[error("Failed to sign token: {0}")]
    SigningError(String),

    /// Signing key or algorithm unusable
    #[error("Invalid signing key: {0}")]
    KeyError(String),
}

impl EventsError {
    /// Get user-friendly error message (no sensitive information)
    pub fn user_message(&self) -> String {
        match self {
            EventsError::NotFound(what) => format!("{} not found", what),
            EventsError::Duplicate(what) => format!("{} already registered", what),
            EventsError::Unauthenticated(_) => "Could not validate credentials".to_string(),
            EventsError::InvalidCredentials => "Incorrect email or password".to_string(),
            EventsError::ValidationError(reason) => reason.clone(),
            EventsError::CryptoError(_) => "Internal error".to_string(),
            EventsError::ConfigurationError(_) => "Internal error".to_string(),
        }
    }
}
