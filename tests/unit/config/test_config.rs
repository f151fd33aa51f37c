// Unit tests for configuration management
// NOTE: These tests must run sequentially to avoid environment variable conflicts

use jsonwebtoken::Algorithm;
use secrecy::ExposeSecret;
use std::env;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;
use tokyo_weekend_events::config::Config;
use tokyo_weekend_events::core::errors::EventsError;

// Global mutex to serialize environment variable access in tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const VARS: [&str; 12] = [
    "BIND_ADDRESS",
    "PORT",
    "JWT_SECRET",
    "JWT_ALGORITHM",
    "ACCESS_TOKEN_EXPIRE_MINUTES",
    "PASSWORD_HASH_MEMORY_KIB",
    "PASSWORD_HASH_ITERATIONS",
    "SEED_DATA",
    "REQUEST_TIMEOUT_SECS",
    "BODY_SIZE_LIMIT_BYTES",
    "LOG_LEVEL",
    "LOG_FORMAT",
];

fn clear_env_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    let guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env_vars();
    guard
}

fn expect_config_error(result: Result<Config, EventsError>, needle: &str) {
    match result {
        Err(EventsError::ConfigurationError(msg)) => {
            assert!(msg.contains(needle), "message {:?} lacks {:?}", msg, needle)
        }
        other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_config_default_values() {
    let _guard = lock_env();
    env::set_var("JWT_SECRET", "a-secret-of-sufficient-length");

    let config = Config::from_env().unwrap();

    assert_eq!(config.bind_address, "0.0.0.0");
    assert_eq!(config.port, 8000);
    assert_eq!(config.jwt_algorithm().unwrap(), Algorithm::HS256);
    assert_eq!(config.access_token_expire_minutes, 30);
    assert_eq!(config.password_hash_memory_kib, 19456);
    assert_eq!(config.password_hash_iterations, 2);
    assert!(config.seed_data);
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.body_size_limit_bytes, 65536);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.log_format, "json");
    assert_eq!(config.jwt_secret.expose_secret(), "a-secret-of-sufficient-length");

    clear_env_vars();
}

#[test]
fn test_config_overrides() {
    let _guard = lock_env();
    env::set_var("JWT_SECRET", "a-secret-of-sufficient-length");
    env::set_var("PORT", "9090");
    env::set_var("JWT_ALGORITHM", "HS512");
    env::set_var("ACCESS_TOKEN_EXPIRE_MINUTES", "5");
    env::set_var("SEED_DATA", "false");
    env::set_var("LOG_FORMAT", "text");

    let config = Config::from_env().unwrap();

    assert_eq!(config.port, 9090);
    assert_eq!(config.jwt_algorithm().unwrap(), Algorithm::HS512);
    assert_eq!(config.access_token_expire_minutes, 5);
    assert!(!config.seed_data);
    assert_eq!(config.log_format, "text");

    clear_env_vars();
}

#[test]
fn test_missing_secret_rejected() {
    let _guard = lock_env();
    expect_config_error(Config::from_env(), "JWT_SECRET not set");
}

#[test]
fn test_empty_secret_rejected() {
    let _guard = lock_env();
    env::set_var("JWT_SECRET", "");
    expect_config_error(Config::from_env(), "JWT_SECRET is empty");
    clear_env_vars();
}

#[test]
fn test_short_secret_rejected() {
    let _guard = lock_env();
    env::set_var("JWT_SECRET", "short");
    expect_config_error(Config::from_env(), "at least 16 bytes");
    clear_env_vars();
}

#[test]
fn test_invalid_port_rejected() {
    let _guard = lock_env();
    env::set_var("JWT_SECRET", "a-secret-of-sufficient-length");

    env::set_var("PORT", "99999");
    expect_config_error(Config::from_env(), "Invalid PORT");

    env::set_var("PORT", "0");
    expect_config_error(Config::from_env(), "PORT must be between 1 and 65535");

    clear_env_vars();
}

#[test]
fn test_zero_timeout_rejected() {
    let _guard = lock_env();
    env::set_var("JWT_SECRET", "a-secret-of-sufficient-length");
    env::set_var("REQUEST_TIMEOUT_SECS", "0");

    expect_config_error(Config::from_env(), "REQUEST_TIMEOUT_SECS must be greater than 0");
    clear_env_vars();
}

#[test]
fn test_unsupported_algorithm_rejected() {
    let _guard = lock_env();
    env::set_var("JWT_SECRET", "a-secret-of-sufficient-length");
    env::set_var("JWT_ALGORITHM", "RS256");

    expect_config_error(Config::from_env(), "JWT_ALGORITHM");
    clear_env_vars();
}

#[test]
fn test_invalid_seed_flag_rejected() {
    let _guard = lock_env();
    env::set_var("JWT_SECRET", "a-secret-of-sufficient-length");
    env::set_var("SEED_DATA", "maybe");

    expect_config_error(Config::from_env(), "SEED_DATA");
    clear_env_vars();
}

#[test]
fn test_invalid_log_settings_rejected() {
    let _guard = lock_env();
    env::set_var("JWT_SECRET", "a-secret-of-sufficient-length");

    env::set_var("LOG_LEVEL", "chatty");
    expect_config_error(Config::from_env(), "LOG_LEVEL");

    env::set_var("LOG_LEVEL", "debug");
    env::set_var("LOG_FORMAT", "yaml");
    expect_config_error(Config::from_env(), "LOG_FORMAT");

    clear_env_vars();
}

#[test]
fn test_env_file_loaded() {
    let _guard = lock_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".env");
    fs::write(
        &path,
        "JWT_SECRET=secret-from-env-file-123\nPORT=7070\nSEED_DATA=0\n",
    )
    .unwrap();

    let config = Config::from_env_file(&path).unwrap();

    assert_eq!(config.jwt_secret.expose_secret(), "secret-from-env-file-123");
    assert_eq!(config.port, 7070);
    assert!(!config.seed_data);

    clear_env_vars();
}

#[test]
fn test_process_env_wins_over_env_file() {
    let _guard = lock_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".env");
    fs::write(&path, "JWT_SECRET=secret-from-env-file-123\nPORT=7070\n").unwrap();
    env::set_var("PORT", "6060");

    let config = Config::from_env_file(&path).unwrap();
    assert_eq!(config.port, 6060);

    clear_env_vars();
}

#[test]
fn test_missing_env_file_rejected() {
    let _guard = lock_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist.env");

    expect_config_error(Config::from_env_file(&path), "Cannot read env file");
}
