//! Persistence for accounts and plants.
//!
//! Services talk to storage through the [`AccountStore`] and [`PlantStore`]
//! traits so the HTTP layer can run against PostgreSQL in production and an
//! in-memory store in tests.
//!
//! - [`postgres`]: sqlx-backed stores
//! - [`memory`]: in-process stores (`test-utils` feature)
//! - [`sequence`]: plant ID allocation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use microtrack_models::{
    Account, HarvestDateOutOfRange, NewAccount, NewPlant, Plant, Role, UpdatePlantDto,
};

use crate::modules::plants::query::PlantQuery;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod sequence;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::{MemoryAccountStore, MemoryPlantStore};
pub use postgres::{PgAccountStore, PgPlantStore};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write; holds the offending field.
    #[error("duplicate {0}")]
    Duplicate(&'static str),
    #[error(transparent)]
    HarvestDateOutOfRange(#[from] HarvestDateOutOfRange),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Account whose email or username equals `identifier`, preferring an email match.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, StoreError>;

    /// Fails with [`StoreError::Duplicate`] when the email or username is taken.
    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Returns `false` when no account has this username.
    async fn set_role(&self, username: &str, role: Role) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait PlantStore: Send + Sync {
    /// Every plant, ordered by `plant_id`.
    async fn list_all(&self) -> Result<Vec<Plant>, StoreError>;

    /// Total number of matches and the requested page, both under the same filter.
    async fn search(&self, query: &PlantQuery) -> Result<(i64, Vec<Plant>), StoreError>;

    /// Allocates the next `plant_id` and stores the plant under it.
    async fn insert(&self, plant: NewPlant) -> Result<Plant, StoreError>;

    /// Applies the supplied fields. Returns `false` when the plant does not exist.
    async fn update(
        &self,
        plant_id: i64,
        changes: &UpdatePlantDto,
        recorded_date: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    async fn delete(&self, plant_id: i64) -> Result<bool, StoreError>;

    /// Deletes every plant named exactly `name`, returning how many were removed.
    async fn delete_by_name(&self, name: &str) -> Result<u64, StoreError>;
}
