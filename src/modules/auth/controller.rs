use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use tracing::instrument;

use microtrack_core::{AppError, ErrorResponse, MessageResponse};
use microtrack_models::{LoginRequest, LoginResponse, SignupDto};

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new account
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupDto,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Validation error, or email/username already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupDto>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let response = AuthService::signup(state.accounts.as_ref(), &state.password_config, dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with email or username and receive a session token
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response =
        AuthService::login(state.accounts.as_ref(), &state.jwt, dto, Utc::now().timestamp())
            .await?;
    Ok(Json(response))
}
