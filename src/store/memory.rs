//! In-process stores used by tests and local tooling.
//!
//! Each store keeps its records behind a single lock, so plant ID allocation
//! and uniqueness checks are atomic with the write that follows them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use microtrack_models::{Account, NewAccount, NewPlant, Plant, Role, UpdatePlantDto};

use super::sequence::next_plant_id;
use super::{AccountStore, PlantStore, StoreError};
use crate::modules::plants::query::PlantQuery;

#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<Vec<Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.username == username).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        let by_email = accounts.iter().find(|a| a.email == identifier);
        Ok(by_email
            .or_else(|| accounts.iter().find(|a| a.username == identifier))
            .cloned())
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(StoreError::Duplicate("email"));
        }
        if accounts.iter().any(|a| a.username == account.username) {
            return Err(StoreError::Duplicate("username"));
        }

        let account = account.into_account();
        accounts.push(account.clone());
        Ok(account)
    }

    async fn set_role(&self, username: &str, role: Role) -> Result<bool, StoreError> {
        let mut accounts = self.accounts.write().await;
        match accounts.iter_mut().find(|a| a.username == username) {
            Some(account) => {
                account.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryPlantStore {
    plants: RwLock<Vec<Plant>>,
}

impl MemoryPlantStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlantStore for MemoryPlantStore {
    async fn list_all(&self) -> Result<Vec<Plant>, StoreError> {
        let mut plants = self.plants.read().await.clone();
        plants.sort_by_key(|p| p.plant_id);
        Ok(plants)
    }

    async fn search(&self, query: &PlantQuery) -> Result<(i64, Vec<Plant>), StoreError> {
        let plants = self.plants.read().await;
        let mut matched: Vec<&Plant> = plants.iter().filter(|p| query.filter.matches(p)).collect();
        let total = matched.len() as i64;

        matched.sort_by(|a, b| query.compare(a, b));
        let page = matched
            .into_iter()
            .skip(query.pagination.skip as usize)
            .take(query.pagination.limit as usize)
            .cloned()
            .collect();

        Ok((total, page))
    }

    async fn insert(&self, plant: NewPlant) -> Result<Plant, StoreError> {
        let mut plants = self.plants.write().await;
        let plant_id = next_plant_id(plants.iter().map(|p| p.plant_id).max());
        let plant = plant.with_id(plant_id);
        plants.push(plant.clone());
        Ok(plant)
    }

    async fn update(
        &self,
        plant_id: i64,
        changes: &UpdatePlantDto,
        recorded_date: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut plants = self.plants.write().await;
        match plants.iter_mut().find(|p| p.plant_id == plant_id) {
            Some(plant) => {
                changes.apply_to(plant, recorded_date)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, plant_id: i64) -> Result<bool, StoreError> {
        let mut plants = self.plants.write().await;
        let before = plants.len();
        plants.retain(|p| p.plant_id != plant_id);
        Ok(plants.len() < before)
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, StoreError> {
        let mut plants = self.plants.write().await;
        let before = plants.len();
        plants.retain(|p| p.name != name);
        Ok((before - plants.len()) as u64)
    }
}
