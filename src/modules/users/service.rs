use anyhow::anyhow;
use tracing::instrument;

use microtrack_core::{AppError, MessageResponse};
use microtrack_models::Role;

use crate::store::AccountStore;

pub struct UserService;

impl UserService {
    /// Grants the `admin` role. Promoting an existing admin succeeds again.
    ///
    /// Tokens issued before the promotion keep the role they were issued with.
    #[instrument(skip(accounts))]
    pub async fn promote(
        accounts: &dyn AccountStore,
        username: &str,
    ) -> Result<MessageResponse, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::bad_request(anyhow!("Username is required")));
        }

        let updated = accounts
            .set_role(username, Role::Admin)
            .await
            .map_err(|e| AppError::storage("Failed to promote user", e))?;

        if !updated {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        tracing::info!(username, "account promoted to admin");
        Ok(MessageResponse::new("User promoted to admin successfully"))
    }
}
