//! Session token issuing and validation.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret from
//! [`JwtConfig`]. The keys are built once at startup and injected into the
//! application state; nothing here reads configuration on its own.
//!
//! Both operations take the current time explicitly so expiry is decided
//! against the caller's clock.
//!
//! # Example
//!
//! ```ignore
//! use microtrack_auth::JwtKeys;
//! use microtrack_config::JwtConfig;
//!
//! let keys = JwtKeys::new(&JwtConfig::from_env());
//! let now = chrono::Utc::now().timestamp();
//!
//! let token = keys.issue("5f0c...", "user", now)?;
//! let claims = keys.validate(&token, now)?;
//! assert_eq!(claims.role, "user");
//! ```

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use microtrack_config::JwtConfig;
use microtrack_core::AppError;

use crate::claims::Claims;

/// Signing and verification keys derived from the shared secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    token_expiry: i64,
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            token_expiry: config.token_expiry,
        }
    }

    /// Token lifetime in seconds.
    pub fn token_expiry(&self) -> i64 {
        self.token_expiry
    }

    /// Issues a token for `subject` holding `role`, expiring `token_expiry`
    /// seconds after `now`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails.
    pub fn issue(&self, subject: &str, role: &str, now: i64) -> Result<String, AppError> {
        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            exp: now + self.token_expiry,
            iat: now,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
    }

    /// Verifies the signature and structure of `token` and rejects it once
    /// `now` is past its `exp` claim.
    ///
    /// # Errors
    ///
    /// Returns an unauthorized error if:
    /// - The signature does not verify
    /// - The token is malformed or lacks a string `role` claim
    /// - The token has expired
    pub fn validate(&self, token: &str, now: i64) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the caller's clock, without leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| invalid_token())?;

        if claims.is_expired_at(now) {
            return Err(invalid_token());
        }

        Ok(claims)
    }
}

fn invalid_token() -> AppError {
    AppError::unauthorized("Invalid or expired token")
}
