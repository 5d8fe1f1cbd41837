use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use microtrack_auth::Claims;
use microtrack_core::AppError;
use microtrack_models::Role;

use crate::state::AppState;

/// The authenticated principal, taken from a validated session token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn account_id(&self) -> &str {
        &self.0.sub
    }

    pub fn role(&self) -> &str {
        &self.0.role
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.0.role == role.as_str()
    }
}

/// Token part of an `Authorization` header value. The `Bearer ` scheme prefix
/// is optional.
pub fn bearer_token(header_value: &str) -> &str {
    let value = header_value.trim_start();
    value.strip_prefix("Bearer ").unwrap_or(value).trim()
}

/// Validates the session token and attaches the [`AuthUser`] to the request.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("Missing token"))?
        .to_str()
        .map_err(|_| AppError::unauthorized("Invalid token"))?;

    let token = bearer_token(header_value);
    if token.is_empty() {
        return Err(AppError::unauthorized("Missing token"));
    }

    let claims = state.jwt.validate(token, Utc::now().timestamp())?;
    tracing::debug!(account_id = %claims.sub, role = %claims.role, "authenticated");

    req.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Missing token"))
    }
}
