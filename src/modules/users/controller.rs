use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use microtrack_core::{AppError, ErrorResponse, MessageResponse};

use super::service::UserService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Promote an account to admin
#[utoipa::path(
    patch,
    path = "/admin/promote/{username}",
    params(
        ("username" = String, Path, description = "Username of the account to promote")
    ),
    responses(
        (status = 200, description = "User promoted to admin successfully", body = MessageResponse),
        (status = 400, description = "Username is blank", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(promoted_by = %auth_user.account_id()))]
pub async fn promote_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = UserService::promote(state.accounts.as_ref(), &username).await?;
    Ok(Json(response))
}
