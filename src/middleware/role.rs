//! Role checks for authenticated principals.

use axum::{extract::Request, middleware::Next, response::Response};

use microtrack_core::AppError;
use microtrack_models::Role;

use crate::middleware::auth::AuthUser;

/// Succeeds when the principal's token carries exactly `required`.
pub fn check_role(auth_user: &AuthUser, required: Role) -> Result<(), AppError> {
    if auth_user.has_role(required) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "{} access required",
            capitalize(required.as_str())
        )))
    }
}

/// Admits only principals authenticated with the `admin` role.
///
/// Must run after [`crate::middleware::auth::authenticate`]; a request with
/// no attached principal is rejected as forbidden.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let auth_user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::forbidden("Admin access required"))?;

    check_role(auth_user, Role::Admin)?;
    Ok(next.run(req).await)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
