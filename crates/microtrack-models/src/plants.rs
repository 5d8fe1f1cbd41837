//! Plant domain models and DTOs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use microtrack_core::serde::{
    deserialize_flexible_datetime, deserialize_optional_flexible_datetime,
};

use crate::accounts::not_blank;

/// A stored plant record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Plant {
    /// Sequential identifier, unique across all plants
    pub plant_id: i64,
    pub group_id: String,
    pub name: String,
    pub scientific_name: String,
    /// Last time the record was created or updated
    pub recorded_date: DateTime<Utc>,
    pub seeding_date: DateTime<Utc>,
    /// Always `seeding_date + growth_days` as of the last write that set `growth_days`
    pub harvest_date: DateTime<Utc>,
    pub growth_days: i32,
    pub description: String,
    pub height: f64,
    pub leaf_color: String,
    pub floor: String,
    pub humidity: f64,
    pub temperature: f64,
    pub growth_stage: String,
}

/// Upper bound accepted for `growth_days` (about a century).
pub const MAX_GROWTH_DAYS: i32 = 36_500;

/// `seeding_date + growth_days` fell outside the representable date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Harvest date is out of range")]
pub struct HarvestDateOutOfRange;

/// Expected harvest date for a plant seeded at `seeding_date`.
pub fn harvest_date_for(
    seeding_date: DateTime<Utc>,
    growth_days: i32,
) -> Result<DateTime<Utc>, HarvestDateOutOfRange> {
    Duration::try_days(i64::from(growth_days))
        .and_then(|days| seeding_date.checked_add_signed(days))
        .ok_or(HarvestDateOutOfRange)
}

/// Payload for creating a plant.
///
/// `plant_id`, `recorded_date` and `harvest_date` are always computed by the
/// server. A missing `group_id` gets a freshly generated one.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePlantDto {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub scientific_name: String,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[serde(deserialize_with = "deserialize_flexible_datetime")]
    #[schema(value_type = String, example = "2024-01-01")]
    pub seeding_date: DateTime<Utc>,
    #[serde(default)]
    #[validate(range(min = 0, max = 36500, message = "Growth days must be between 0 and 36500"))]
    pub growth_days: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub leaf_color: String,
    #[serde(default)]
    pub floor: String,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub growth_stage: String,
}

/// A plant ready for insertion; only the identifier is left to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlant {
    pub group_id: String,
    pub name: String,
    pub scientific_name: String,
    pub recorded_date: DateTime<Utc>,
    pub seeding_date: DateTime<Utc>,
    pub harvest_date: DateTime<Utc>,
    pub growth_days: i32,
    pub description: String,
    pub height: f64,
    pub leaf_color: String,
    pub floor: String,
    pub humidity: f64,
    pub temperature: f64,
    pub growth_stage: String,
}

impl NewPlant {
    pub fn with_id(self, plant_id: i64) -> Plant {
        Plant {
            plant_id,
            group_id: self.group_id,
            name: self.name,
            scientific_name: self.scientific_name,
            recorded_date: self.recorded_date,
            seeding_date: self.seeding_date,
            harvest_date: self.harvest_date,
            growth_days: self.growth_days,
            description: self.description,
            height: self.height,
            leaf_color: self.leaf_color,
            floor: self.floor,
            humidity: self.humidity,
            temperature: self.temperature,
            growth_stage: self.growth_stage,
        }
    }
}

/// Partial update of a plant. Only supplied fields are written, so explicit
/// zero or empty values are applied.
///
/// `harvest_date` is recomputed when `growth_days` is supplied, from the new
/// `seeding_date` if one is supplied too, otherwise from the stored one.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePlantDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_flexible_datetime")]
    #[schema(value_type = Option<String>, example = "2024-01-01")]
    pub seeding_date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(range(min = 0, max = 36500, message = "Growth days must be between 0 and 36500"))]
    pub growth_days: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub leaf_color: Option<String>,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub growth_stage: Option<String>,
}

impl UpdatePlantDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.group_id.is_none()
            && self.scientific_name.is_none()
            && self.seeding_date.is_none()
            && self.growth_days.is_none()
            && self.description.is_none()
            && self.height.is_none()
            && self.leaf_color.is_none()
            && self.floor.is_none()
            && self.humidity.is_none()
            && self.temperature.is_none()
            && self.growth_stage.is_none()
    }

    /// Applies the supplied fields to `plant` in place.
    ///
    /// Nothing is written when the recomputed harvest date is out of range.
    pub fn apply_to(
        &self,
        plant: &mut Plant,
        recorded_date: DateTime<Utc>,
    ) -> Result<(), HarvestDateOutOfRange> {
        let harvest_date = match self.growth_days {
            Some(growth_days) => Some(harvest_date_for(
                self.seeding_date.unwrap_or(plant.seeding_date),
                growth_days,
            )?),
            None => None,
        };

        if let Some(name) = &self.name {
            plant.name = name.clone();
        }
        if let Some(group_id) = &self.group_id {
            plant.group_id = group_id.clone();
        }
        if let Some(scientific_name) = &self.scientific_name {
            plant.scientific_name = scientific_name.clone();
        }
        if let Some(seeding_date) = self.seeding_date {
            plant.seeding_date = seeding_date;
        }
        if let Some(growth_days) = self.growth_days {
            plant.growth_days = growth_days;
        }
        if let Some(harvest_date) = harvest_date {
            plant.harvest_date = harvest_date;
        }
        if let Some(description) = &self.description {
            plant.description = description.clone();
        }
        if let Some(height) = self.height {
            plant.height = height;
        }
        if let Some(leaf_color) = &self.leaf_color {
            plant.leaf_color = leaf_color.clone();
        }
        if let Some(floor) = &self.floor {
            plant.floor = floor.clone();
        }
        if let Some(humidity) = self.humidity {
            plant.humidity = humidity;
        }
        if let Some(temperature) = self.temperature {
            plant.temperature = temperature;
        }
        if let Some(growth_stage) = &self.growth_stage {
            plant.growth_stage = growth_stage.clone();
        }
        plant.recorded_date = recorded_date;
        Ok(())
    }
}

/// Raw search query parameters.
///
/// Everything arrives as text; empty values count as absent and numeric
/// values are parsed when the query is built.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PlantSearchParams {
    /// Exact plant ID
    pub plant_id: Option<String>,
    /// Exact group ID
    pub group_id: Option<String>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the scientific name
    pub scientific_name: Option<String>,
    /// Case-insensitive substring of the description
    pub description: Option<String>,
    /// Case-insensitive substring of the growth stage
    pub growth_stage: Option<String>,
    /// Minimum growth days (inclusive)
    pub min_growth_days: Option<String>,
    /// Maximum growth days (inclusive)
    pub max_growth_days: Option<String>,
    /// Page size, 1-100 (default 10)
    pub limit: Option<String>,
    /// Number of records to skip (default 0)
    pub skip: Option<String>,
    /// Sort column (default `name`)
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default `asc`)
    pub sort_order: Option<String>,
}

/// One page of search results with the total match count.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlantListResponse {
    pub total: i64,
    pub plants: Vec<Plant>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteByNameResponse {
    pub message: String,
    pub deleted_count: u64,
}
