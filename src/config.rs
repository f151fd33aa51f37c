// Configuration management

use crate::core::crypto::MIN_SECRET_LEN;
use crate::core::errors::EventsError;
use jsonwebtoken::Algorithm;
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::path::Path;

/// Application configuration loaded from environment variables
///
/// All configuration is validated on load with clear error messages.
#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub bind_address: String,
    pub port: u16,

    // Token configuration
    pub jwt_secret: SecretString,
    pub jwt_algorithm: String,
    pub access_token_expire_minutes: u64,

    // Argon2 cost parameters
    pub password_hash_memory_kib: u32,
    pub password_hash_iterations: u32,

    // Load the demo catalogue at startup
    pub seed_data: bool,

    // Middleware configuration
    pub request_timeout_secs: u64,
    pub body_size_limit_bytes: usize,

    // Logging configuration
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Supports `.env` file loading in development (via dotenv crate).
    pub fn from_env() -> Result<Self, EventsError> {
        // Load .env file if present (development)
        // Skip in test builds to avoid interfering with test environment variables
        #[cfg(not(test))]
        {
            dotenv::dotenv().ok(); // Ignore errors (file may not exist)
        }

        Self::load()
    }

    /// Load an explicit env file, then read configuration from the environment
    ///
    /// Variables already set in the process take precedence over the file.
    pub fn from_env_file(path: &Path) -> Result<Self, EventsError> {
        dotenv::from_path(path).map_err(|e| {
            EventsError::ConfigurationError(format!("Cannot read env file {:?}: {}", path, e))
        })?;

        Self::load()
    }

    fn load() -> Result<Self, EventsError> {
        let config = Self {
            bind_address: Self::get_env_or_default("BIND_ADDRESS", "0.0.0.0")?,
            port: Self::parse_port()?,
            jwt_secret: Self::get_required_secret("JWT_SECRET")?,
            jwt_algorithm: Self::get_env_or_default("JWT_ALGORITHM", "HS256")?,
            access_token_expire_minutes: Self::parse_u64_or_default("ACCESS_TOKEN_EXPIRE_MINUTES", 30)?,
            password_hash_memory_kib: Self::parse_u32_or_default("PASSWORD_HASH_MEMORY_KIB", 19456)?,
            password_hash_iterations: Self::parse_u32_or_default("PASSWORD_HASH_ITERATIONS", 2)?,
            seed_data: Self::parse_bool_or_default("SEED_DATA", true)?,
            request_timeout_secs: Self::parse_u64_or_default("REQUEST_TIMEOUT_SECS", 30)?,
            body_size_limit_bytes: Self::parse_usize_or_default("BODY_SIZE_LIMIT_BYTES", 64 * 1024)?,
            log_level: Self::get_env_or_default("LOG_LEVEL", "info")?,
            log_format: Self::get_env_or_default("LOG_FORMAT", "json")?,
        };

        // Post-load validation
        config.validate()?;

        Ok(config)
    }

    /// Signing algorithm named by `jwt_algorithm`
    pub fn jwt_algorithm(&self) -> Result<Algorithm, EventsError> {
        Self::parse_algorithm(&self.jwt_algorithm)
    }

    /// Get environment variable or return default value
    pub(crate) fn get_env_or_default(key: &str, default: &str) -> Result<String, EventsError> {
        Ok(env::var(key).unwrap_or_else(|_| default.to_string()))
    }

    /// Get a required secret from an environment variable
    fn get_required_secret(key: &str) -> Result<SecretString, EventsError> {
        let value = env::var(key)
            .map_err(|_| EventsError::ConfigurationError(format!("{} not set", key)))?;

        if value.is_empty() {
            return Err(EventsError::ConfigurationError(format!("{} is empty", key)));
        }

        Ok(SecretString::new(value))
    }

    /// Parse port from PORT environment variable
    pub(crate) fn parse_port() -> Result<u16, EventsError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
        let port = port_str.parse::<u16>().map_err(|e| {
            EventsError::ConfigurationError(format!("Invalid PORT value '{}': {}", port_str, e))
        })?;

        if port == 0 {
            return Err(EventsError::ConfigurationError(
                "PORT must be between 1 and 65535".to_string(),
            ));
        }

        Ok(port)
    }

    /// Parse u64 from environment variable or return default
    fn parse_u64_or_default(key: &str, default: u64) -> Result<u64, EventsError> {
        match env::var(key) {
            Ok(value) => Self::parse_positive(key, &value),
            _ => Ok(default),
        }
    }

    /// Parse u32 from environment variable or return default
    fn parse_u32_or_default(key: &str, default: u32) -> Result<u32, EventsError> {
        match env::var(key) {
            Ok(value) => Self::parse_positive(key, &value),
            _ => Ok(default),
        }
    }

    /// Parse usize from environment variable or return default
    fn parse_usize_or_default(key: &str, default: usize) -> Result<usize, EventsError> {
        match env::var(key) {
            Ok(value) => Self::parse_positive(key, &value),
            _ => Ok(default),
        }
    }

    /// Parse a strictly positive integer
    fn parse_positive<T>(key: &str, value: &str) -> Result<T, EventsError>
    where
        T: std::str::FromStr + PartialEq + Default,
        T::Err: std::fmt::Display,
    {
        let parsed = value.parse::<T>().map_err(|e| {
            EventsError::ConfigurationError(format!("Invalid {} value '{}': {}", key, value, e))
        })?;

        if parsed == T::default() {
            return Err(EventsError::ConfigurationError(format!(
                "{} must be greater than 0",
                key
            )));
        }

        Ok(parsed)
    }

    /// Parse a boolean flag (true/false, 1/0, yes/no) or return default
    pub(crate) fn parse_bool_or_default(key: &str, default: bool) -> Result<bool, EventsError> {
        match env::var(key) {
            Ok(value) => match value.to_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(EventsError::ConfigurationError(format!(
                    "Invalid {} value '{}': expected true or false",
                    key, value
                ))),
            },
            _ => Ok(default),
        }
    }

    /// Validate all configuration values
    fn validate(&self) -> Result<(), EventsError> {
        if self.jwt_secret.expose_secret().len() < MIN_SECRET_LEN {
            return Err(EventsError::ConfigurationError(format!(
                "JWT_SECRET must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }

        Self::parse_algorithm(&self.jwt_algorithm)?;

        // Validate log level
        Self::validate_log_level(&self.log_level)?;

        // Validate log format
        Self::validate_log_format(&self.log_format)?;

        Ok(())
    }

    /// Only the HMAC family is supported
    fn parse_algorithm(name: &str) -> Result<Algorithm, EventsError> {
        match name.to_uppercase().as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            _ => Err(EventsError::ConfigurationError(format!(
                "Invalid JWT_ALGORITHM '{}': must be one of HS256, HS384, HS512",
                name
            ))),
        }
    }

    /// Validate log level
    fn validate_log_level(level: &str) -> Result<(), EventsError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&level.to_lowercase().as_str()) {
            return Err(EventsError::ConfigurationError(format!(
                "Invalid LOG_LEVEL '{}': must be one of {}",
                level,
                valid_levels.join(", ")
            )));
        }
        Ok(())
    }

    /// Validate log format
    fn validate_log_format(format: &str) -> Result<(), EventsError> {
        if format != "json" && format != "text" {
            return Err(EventsError::ConfigurationError(format!(
                "Invalid LOG_FORMAT '{}': must be 'json' or 'text'",
                format
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Create a test configuration
    ///
    /// Bypasses environment loading and uses cheap Argon2 parameters.
    pub fn test_config() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8000,
            jwt_secret: SecretString::new("test-secret-key-0123456789abcdef".to_string()),
            jwt_algorithm: "HS256".to_string(),
            access_token_expire_minutes: 30,
            password_hash_memory_kib: 1024,
            password_hash_iterations: 1,
            seed_data: true,
            request_timeout_secs: 30,
            body_size_limit_bytes: 64 * 1024,
            log_level: "info".to_string(),
            log_format: "json".to_string(),
        }
    }
}
