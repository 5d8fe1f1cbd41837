use std::env;

pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 24 * 60 * 60;

/// Signing configuration shared by every request handler.
///
/// The secret is read once at startup and never rotated while the process runs.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_expiry: i64,
}

impl JwtConfig {
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set.
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            token_expiry: env::var("JWT_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs: &i64| *secs > 0)
                .unwrap_or(DEFAULT_TOKEN_EXPIRY_SECS),
        }
    }
}
