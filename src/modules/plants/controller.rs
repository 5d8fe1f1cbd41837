use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use tracing::instrument;

use microtrack_core::{AppError, ErrorResponse, MessageResponse};
use microtrack_models::{
    CreatePlantDto, DeleteByNameResponse, Plant, PlantListResponse, PlantSearchParams,
    UpdatePlantDto,
};

use super::service::{PlantService, parse_plant_id};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List every plant
#[utoipa::path(
    get,
    path = "/plants",
    responses(
        (status = 200, description = "All plants ordered by plant ID", body = Vec<Plant>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Plants"
)]
#[instrument(skip(state))]
pub async fn list_plants(State(state): State<AppState>) -> Result<Json<Vec<Plant>>, AppError> {
    let plants = PlantService::list(state.plants.as_ref()).await?;
    Ok(Json(plants))
}

/// Search plants with filters, sorting and pagination
#[utoipa::path(
    get,
    path = "/plants/search",
    params(PlantSearchParams),
    responses(
        (status = 200, description = "Matching plants and their total count", body = PlantListResponse),
        (status = 400, description = "Invalid plant_id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Plants"
)]
#[instrument(skip(state))]
pub async fn search_plants(
    State(state): State<AppState>,
    Query(params): Query<PlantSearchParams>,
) -> Result<Json<PlantListResponse>, AppError> {
    let response = PlantService::search(state.plants.as_ref(), &params).await?;
    Ok(Json(response))
}

/// Create a plant
#[utoipa::path(
    post,
    path = "/plants",
    request_body = CreatePlantDto,
    responses(
        (status = 201, description = "Plant created", body = Plant),
        (status = 400, description = "Invalid plant data", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Plants"
)]
#[instrument(skip(state, dto))]
pub async fn create_plant(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreatePlantDto>,
) -> Result<(StatusCode, Json<Plant>), AppError> {
    let plant = PlantService::create(state.plants.as_ref(), dto, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(plant)))
}

/// Update the supplied fields of a plant
#[utoipa::path(
    put,
    path = "/plants/{plant_id}",
    params(
        ("plant_id" = i64, Path, description = "Plant ID")
    ),
    request_body = UpdatePlantDto,
    responses(
        (status = 200, description = "Plant updated successfully", body = MessageResponse),
        (status = 400, description = "Invalid plant ID or request body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Plant not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Plants"
)]
#[instrument(skip(state, dto))]
pub async fn update_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdatePlantDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let plant_id = parse_plant_id(&plant_id)?;
    let response = PlantService::update(state.plants.as_ref(), plant_id, dto, Utc::now()).await?;
    Ok(Json(response))
}

/// Delete a plant
#[utoipa::path(
    delete,
    path = "/plants/{plant_id}",
    params(
        ("plant_id" = i64, Path, description = "Plant ID")
    ),
    responses(
        (status = 200, description = "Plant deleted successfully", body = MessageResponse),
        (status = 400, description = "Invalid plant ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Plant not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Plants"
)]
#[instrument(skip(state))]
pub async fn delete_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let plant_id = parse_plant_id(&plant_id)?;
    let response = PlantService::delete(state.plants.as_ref(), plant_id).await?;
    Ok(Json(response))
}

/// Delete every plant with the given name
#[utoipa::path(
    delete,
    path = "/plants/delete-by-name/{name}",
    params(
        ("name" = String, Path, description = "Exact plant name")
    ),
    responses(
        (status = 200, description = "Plants deleted", body = DeleteByNameResponse),
        (status = 400, description = "Name is required", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Plants"
)]
#[instrument(skip(state))]
pub async fn delete_plants_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteByNameResponse>, AppError> {
    let response = PlantService::delete_by_name(state.plants.as_ref(), &name).await?;
    Ok(Json(response))
}
