//! Limit/skip pagination for list endpoints.
//!
//! Query parameters arrive as raw strings and are resolved leniently: a value
//! that cannot be used falls back to its default instead of failing the
//! request.
//!
//! - `limit`: 1-100, default 10. Non-positive or unparsable values use the default,
//!   values above the maximum are clamped.
//! - `skip`: default 0. Negative or unparsable values use the default.
//!
//! # Example
//!
//! ```ignore
//! use microtrack_core::pagination::Pagination;
//!
//! let page = Pagination::from_raw(Some("500"), Some("abc"));
//! assert_eq!(page.limit, 100);
//! assert_eq!(page.skip, 0);
//! ```

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Pagination {
    pub limit: i64,
    pub skip: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: 0,
        }
    }
}

impl Pagination {
    pub fn from_raw(limit: Option<&str>, skip: Option<&str>) -> Self {
        Self {
            limit: resolve_limit(limit),
            skip: resolve_skip(skip),
        }
    }
}

pub fn resolve_limit(raw: Option<&str>) -> i64 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(limit) if limit > 0 => limit.min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    }
}

pub fn resolve_skip(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|skip| *skip >= 0)
        .unwrap_or(0)
}
