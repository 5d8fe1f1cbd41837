//! # MicroTrack Core
//!
//! Core types, errors, and utilities for the MicroTrack API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Limit/skip resolution for list endpoints
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Custom serde helpers for request payloads
//!
//! # Example
//!
//! ```ignore
//! use microtrack_core::errors::AppError;
//! use microtrack_core::password::{hash_password_with_cost, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Plant not found"));
//! let hash = hash_password_with_cost("secure_password", 12)?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse, MessageResponse};
pub use pagination::Pagination;
pub use password::{hash_password_with_cost, verify_password};
