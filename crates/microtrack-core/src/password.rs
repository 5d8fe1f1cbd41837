//! Password hashing with bcrypt.
//!
//! The salt and cost are embedded in the produced digest, so verification only
//! needs the stored string.

use anyhow::anyhow;
use bcrypt::{hash, verify};

use crate::errors::AppError;

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes with an explicit work factor. Inputs longer than
/// [`MAX_PASSWORD_BYTES`] are rejected instead of silently truncated.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::bad_request(anyhow!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }

    hash(password, cost).map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

/// Returns `Ok(false)` on mismatch; errors only when `hash` is not a bcrypt digest.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    // Such a password can never have been hashed, and bcrypt would compare a truncated prefix.
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }

    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}
