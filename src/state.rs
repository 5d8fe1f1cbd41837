use std::sync::Arc;

use microtrack_auth::JwtKeys;
use microtrack_config::{CorsConfig, JwtConfig, PasswordConfig};
use sqlx::PgPool;

use crate::store::{AccountStore, PgAccountStore, PgPlantStore, PlantStore};

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub plants: Arc<dyn PlantStore>,
    pub jwt: JwtKeys,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        plants: Arc<dyn PlantStore>,
        jwt_config: &JwtConfig,
        password_config: PasswordConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            accounts,
            plants,
            jwt: JwtKeys::new(jwt_config),
            password_config,
            cors_config,
        }
    }

    /// PostgreSQL-backed state with every setting read from the environment.
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgAccountStore::new(pool.clone())),
            Arc::new(PgPlantStore::new(pool)),
            &JwtConfig::from_env(),
            PasswordConfig::from_env(),
            CorsConfig::from_env(),
        )
    }

    /// State over empty in-memory stores.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn in_memory(jwt_config: &JwtConfig, password_config: PasswordConfig) -> Self {
        use crate::store::{MemoryAccountStore, MemoryPlantStore};

        Self::new(
            Arc::new(MemoryAccountStore::new()),
            Arc::new(MemoryPlantStore::new()),
            jwt_config,
            password_config,
            CorsConfig {
                allowed_origins: vec![],
            },
        )
    }
}
