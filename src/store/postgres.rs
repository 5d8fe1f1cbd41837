//! PostgreSQL-backed stores.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use microtrack_models::{
    Account, HarvestDateOutOfRange, NewAccount, NewPlant, Plant, Role, UpdatePlantDto,
};

use super::sequence::NEXT_PLANT_ID_SQL;
use super::{AccountStore, PlantStore, StoreError};
use crate::modules::plants::query::{PlantFilter, PlantQuery, escape_like};

const ACCOUNT_COLUMNS: &str = "id, username, email, first_name, last_name, password_hash, role";

const PLANT_COLUMNS: &str = "plant_id, group_id, name, scientific_name, recorded_date, \
    seeding_date, harvest_date, growth_days, description, height, leaf_color, floor, \
    humidity, temperature, growth_stage";

fn map_unique_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some(constraint) if constraint.contains("email") => "email",
                _ => "username",
            };
            return StoreError::Duplicate(field);
        }
    }
    StoreError::Database(err)
}

/// SQLSTATE `22008`: a date/time computation left the supported range.
fn map_datetime_overflow(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("22008") {
            return StoreError::HarvestDateOutOfRange(HarvestDateOutOfRange);
        }
    }
    StoreError::Database(err)
}

#[derive(Clone, Debug)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {} FROM accounts WHERE email = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {} FROM accounts WHERE username = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {} FROM accounts
             WHERE email = $1 OR username = $1
             ORDER BY (email = $1) DESC
             LIMIT 1",
            ACCOUNT_COLUMNS
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    #[instrument(skip(self, account), fields(username = %account.username))]
    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO accounts (id, username, email, first_name, last_name, password_hash, role)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            ACCOUNT_COLUMNS
        ))
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)
    }

    async fn set_role(&self, username: &str, role: Role) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE accounts SET role = $2 WHERE username = $1")
            .bind(username)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone, Debug)]
pub struct PgPlantStore {
    pool: PgPool,
}

impl PgPlantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Appends the `WHERE` clause shared by the count and page queries.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &PlantFilter) {
    qb.push(" WHERE TRUE");

    if let Some(plant_id) = filter.plant_id {
        qb.push(" AND plant_id = ").push_bind(plant_id);
    }
    if let Some(group_id) = &filter.group_id {
        qb.push(" AND group_id = ").push_bind(group_id.clone());
    }
    for (column, needle) in filter.substring_filters() {
        qb.push(format!(" AND {} ILIKE ", column))
            .push_bind(format!("%{}%", escape_like(needle)))
            .push(" ESCAPE '\\'");
    }
    if let Some(min) = filter.min_growth_days {
        qb.push(" AND growth_days >= ").push_bind(min);
    }
    if let Some(max) = filter.max_growth_days {
        qb.push(" AND growth_days <= ").push_bind(max);
    }
}

#[async_trait]
impl PlantStore for PgPlantStore {
    async fn list_all(&self) -> Result<Vec<Plant>, StoreError> {
        let plants = sqlx::query_as::<_, Plant>(&format!(
            "SELECT {} FROM plants ORDER BY plant_id",
            PLANT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(plants)
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &PlantQuery) -> Result<(i64, Vec<Plant>), StoreError> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM plants");
        push_filter(&mut count_qb, &query.filter);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut page_qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM plants", PLANT_COLUMNS));
        push_filter(&mut page_qb, &query.filter);
        // Column and direction come from closed enums, never from raw input.
        page_qb.push(format!(
            " ORDER BY {} {}, plant_id ASC",
            query.sort_by.as_column(),
            query.sort_order.as_sql()
        ));
        page_qb
            .push(" LIMIT ")
            .push_bind(query.pagination.limit)
            .push(" OFFSET ")
            .push_bind(query.pagination.skip);

        let plants = page_qb
            .build_query_as::<Plant>()
            .fetch_all(&self.pool)
            .await?;

        Ok((total, plants))
    }

    #[instrument(skip(self, plant), fields(name = %plant.name))]
    async fn insert(&self, plant: NewPlant) -> Result<Plant, StoreError> {
        let mut tx = self.pool.begin().await?;

        let plant_id: i64 = sqlx::query_scalar(NEXT_PLANT_ID_SQL)
            .fetch_one(&mut *tx)
            .await?;

        let stored = sqlx::query_as::<_, Plant>(&format!(
            "INSERT INTO plants ({columns})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {columns}",
            columns = PLANT_COLUMNS
        ))
        .bind(plant_id)
        .bind(&plant.group_id)
        .bind(&plant.name)
        .bind(&plant.scientific_name)
        .bind(plant.recorded_date)
        .bind(plant.seeding_date)
        .bind(plant.harvest_date)
        .bind(plant.growth_days)
        .bind(&plant.description)
        .bind(plant.height)
        .bind(&plant.leaf_color)
        .bind(&plant.floor)
        .bind(plant.humidity)
        .bind(plant.temperature)
        .bind(&plant.growth_stage)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(stored)
    }

    #[instrument(skip(self, changes))]
    async fn update(
        &self,
        plant_id: i64,
        changes: &UpdatePlantDto,
        recorded_date: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        // SET expressions read the pre-update row, so the harvest date uses the
        // new seeding date when one is supplied and the stored one otherwise.
        let result = sqlx::query(
            "UPDATE plants SET
                name = COALESCE($2, name),
                group_id = COALESCE($3, group_id),
                scientific_name = COALESCE($4, scientific_name),
                seeding_date = COALESCE($5, seeding_date),
                growth_days = COALESCE($6, growth_days),
                harvest_date = CASE
                    WHEN $6::INTEGER IS NULL THEN harvest_date
                    ELSE COALESCE($5, seeding_date) + make_interval(days => $6::INTEGER)
                END,
                description = COALESCE($7, description),
                height = COALESCE($8, height),
                leaf_color = COALESCE($9, leaf_color),
                floor = COALESCE($10, floor),
                humidity = COALESCE($11, humidity),
                temperature = COALESCE($12, temperature),
                growth_stage = COALESCE($13, growth_stage),
                recorded_date = $14
             WHERE plant_id = $1",
        )
        .bind(plant_id)
        .bind(&changes.name)
        .bind(&changes.group_id)
        .bind(&changes.scientific_name)
        .bind(changes.seeding_date)
        .bind(changes.growth_days)
        .bind(&changes.description)
        .bind(changes.height)
        .bind(&changes.leaf_color)
        .bind(&changes.floor)
        .bind(changes.humidity)
        .bind(changes.temperature)
        .bind(&changes.growth_stage)
        .bind(recorded_date)
        .execute(&self.pool)
        .await
        .map_err(map_datetime_overflow)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, plant_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM plants WHERE plant_id = $1")
            .bind(plant_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM plants WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
