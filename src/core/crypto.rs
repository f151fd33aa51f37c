// Bearer token signing and verification (HMAC JWT)

use crate::core::errors::CryptoError;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum accepted HMAC secret length in bytes
pub const MIN_SECRET_LEN: usize = 16;

/// Claims embedded in every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email
    #[serde(default)]
    pub sub: String,
    /// Expiration, seconds since the Unix epoch
    pub exp: i64,
}

/// Reasons a presented token is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Token has no subject claim")]
    MissingSubject,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Issues and verifies signed, time-limited bearer tokens.
///
/// The secret and algorithm are injected; only the HMAC family is accepted.
/// Verification is pure computation, so one instance can be shared freely.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl TokenService {
    /// TTL used by `issue` when the caller passes none
    pub const DEFAULT_TTL_MINUTES: i64 = 15;

    /// Create a token service from a shared secret and an HMAC algorithm
    pub fn new(secret: &SecretString, algorithm: Algorithm) -> Result<Self, CryptoError> {
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(CryptoError::KeyError(format!(
                "Unsupported algorithm {:?}: only HS256, HS384 and HS512 are allowed",
                algorithm
            )));
        }

        let secret_bytes = secret.expose_secret().as_bytes();
        if secret_bytes.len() < MIN_SECRET_LEN {
            return Err(CryptoError::KeyError(format!(
                "Secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            algorithm,
            default_ttl: Duration::minutes(Self::DEFAULT_TTL_MINUTES),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Issue a token for `subject`, expiring `ttl` from now (15 minutes by default)
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<String, CryptoError> {
        let expires_at = Utc::now() + ttl.unwrap_or(self.default_ttl);
        let claims = Claims {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| CryptoError::SigningError(e.to_string()))
    }

    /// Check signature, expiration and subject presence
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::MissingRequiredClaim(claim) if claim == "sub" => TokenError::MissingSubject,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;

        if data.claims.sub.is_empty() {
            return Err(TokenError::MissingSubject);
        }

        Ok(data.claims)
    }
}
