use anyhow::anyhow;
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

use microtrack_core::{AppError, MessageResponse};
use microtrack_models::{
    CreatePlantDto, DeleteByNameResponse, NewPlant, Plant, PlantListResponse, PlantSearchParams,
    UpdatePlantDto, harvest_date_for,
};

use super::query::PlantQuery;
use crate::store::{PlantStore, StoreError};

/// Parses a `plant_id` path segment.
pub fn parse_plant_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::bad_request(anyhow!("Invalid plant ID")))
}

pub struct PlantService;

impl PlantService {
    pub async fn list(plants: &dyn PlantStore) -> Result<Vec<Plant>, AppError> {
        plants
            .list_all()
            .await
            .map_err(|e| AppError::storage("Failed to fetch plants", e))
    }

    #[instrument(skip(plants))]
    pub async fn search(
        plants: &dyn PlantStore,
        params: &PlantSearchParams,
    ) -> Result<PlantListResponse, AppError> {
        let query = PlantQuery::from_params(params)?;

        let (total, plants) = plants
            .search(&query)
            .await
            .map_err(|e| AppError::storage("Failed to search plants", e))?;

        Ok(PlantListResponse { total, plants })
    }

    /// Stores a new plant with a freshly allocated `plant_id`.
    #[instrument(skip(plants, dto), fields(name = %dto.name))]
    pub async fn create(
        plants: &dyn PlantStore,
        dto: CreatePlantDto,
        now: DateTime<Utc>,
    ) -> Result<Plant, AppError> {
        let group_id = dto
            .group_id
            .filter(|g| !g.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

        let plant = NewPlant {
            group_id,
            name: dto.name,
            scientific_name: dto.scientific_name,
            recorded_date: now,
            seeding_date: dto.seeding_date,
            harvest_date: harvest_date_for(dto.seeding_date, dto.growth_days)
                .map_err(AppError::bad_request)?,
            growth_days: dto.growth_days,
            description: dto.description,
            height: dto.height,
            leaf_color: dto.leaf_color,
            floor: dto.floor,
            humidity: dto.humidity,
            temperature: dto.temperature,
            growth_stage: dto.growth_stage,
        };

        let plant = plants
            .insert(plant)
            .await
            .map_err(|e| AppError::storage("Failed to insert plant", e))?;

        tracing::info!(plant_id = plant.plant_id, "plant created");
        Ok(plant)
    }

    #[instrument(skip(plants, dto))]
    pub async fn update(
        plants: &dyn PlantStore,
        plant_id: i64,
        dto: UpdatePlantDto,
        now: DateTime<Utc>,
    ) -> Result<MessageResponse, AppError> {
        if dto.is_empty() {
            return Err(AppError::bad_request(anyhow!("No fields to update")));
        }
        if dto.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(AppError::bad_request(anyhow!("Name must not be blank")));
        }

        let updated = plants
            .update(plant_id, &dto, now)
            .await
            .map_err(|e| match e {
                StoreError::HarvestDateOutOfRange(e) => AppError::bad_request(e),
                e => AppError::storage("Failed to update plant", e),
            })?;

        if !updated {
            return Err(AppError::not_found(anyhow!("Plant not found")));
        }

        Ok(MessageResponse::new("Plant updated successfully"))
    }

    #[instrument(skip(plants))]
    pub async fn delete(plants: &dyn PlantStore, plant_id: i64) -> Result<MessageResponse, AppError> {
        let deleted = plants
            .delete(plant_id)
            .await
            .map_err(|e| AppError::storage("Failed to delete plant", e))?;

        if !deleted {
            return Err(AppError::not_found(anyhow!("Plant not found")));
        }

        Ok(MessageResponse::new("Plant deleted successfully"))
    }

    /// Deletes every plant with exactly this name. Zero matches is not an error.
    #[instrument(skip(plants))]
    pub async fn delete_by_name(
        plants: &dyn PlantStore,
        name: &str,
    ) -> Result<DeleteByNameResponse, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::bad_request(anyhow!("Name is required")));
        }

        let deleted_count = plants
            .delete_by_name(name)
            .await
            .map_err(|e| AppError::storage("Failed to delete plants", e))?;

        Ok(DeleteByNameResponse {
            message: format!("Deleted {} plant(s) with name '{}'", deleted_count, name),
            deleted_count,
        })
    }
}
