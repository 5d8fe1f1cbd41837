//! Session token claims.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by a session token.
///
/// Authorization decisions are made from these claims alone, so a role change
/// in the account store only takes effect once a new token is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Account ID (subject claim)
    pub sub: String,
    /// Account role at the time the token was issued
    pub role: String,
    /// Token expiration timestamp (Unix seconds)
    pub exp: i64,
    /// Token issued-at timestamp (Unix seconds)
    pub iat: i64,
}

impl Claims {
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.exp
    }
}
