//! # MicroTrack Auth
//!
//! Session token types and JWT utilities for the MicroTrack API.
//!
//! - [`claims`]: The claims carried by a session token (`sub`, `role`, `exp`, `iat`)
//! - [`jwt`]: [`JwtKeys`], which issues and validates tokens with the shared secret
//!
//! Tokens are not persisted and cannot be revoked; a token stays valid until
//! its `exp` claim passes.

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::JwtKeys;
