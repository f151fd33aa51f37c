// Password hashing and verification (Argon2id, PHC string format)

use crate::core::errors::CryptoError;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::fmt;

/// Plaintext password wrapper with memory protection
///
/// Uses `secrecy::Secret` so the password never shows up in logs or
/// debug output.
#[derive(Deserialize)]
#[serde(from = "String")]
pub struct Password(Secret<String>);

impl Password {
    pub fn new(password: &str) -> Self {
        Self(Secret::new(password.to_string()))
    }

    /// Expose the plaintext (use with caution)
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.expose_secret().is_empty()
    }
}

impl From<String> for Password {
    fn from(password: String) -> Self {
        Self(Secret::new(password))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Password").field(&"<REDACTED>").finish()
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<REDACTED>")
    }
}

/// Salted, cost-factored one-way password hasher
///
/// Each call to `hash` draws a fresh salt, so equal passwords produce
/// different stored strings. Cost parameters travel inside the PHC string,
/// which lets `verify` check hashes produced under other parameters.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Argon2id with explicit memory (KiB) and iteration costs
    pub fn with_cost(memory_kib: u32, iterations: u32) -> Result<Self, CryptoError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|e| CryptoError::HashingError(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a password into a PHC string
    pub fn hash(&self, password: &Password) -> Result<String, CryptoError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CryptoError::HashingError(e.to_string()))
    }

    /// True iff `password` matches `hash`. Malformed or empty hashes verify false.
    pub fn verify(&self, password: &Password, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };
        self.argon2
            .verify_password(password.expose_secret().as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}
