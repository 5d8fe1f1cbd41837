use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use microtrack_auth::JwtKeys;
use microtrack_config::PasswordConfig;
use microtrack_core::{AppError, MessageResponse, hash_password_with_cost, verify_password};
use microtrack_models::{LoginRequest, LoginResponse, NewAccount, Role, SignupDto};

use crate::store::{AccountStore, StoreError};

const INVALID_CREDENTIALS: &str = "Invalid username/email or password";

fn duplicate_error(field: &str) -> AppError {
    match field {
        "email" => AppError::bad_request(anyhow!("Email already registered")),
        _ => AppError::bad_request(anyhow!("Username already taken")),
    }
}

pub struct AuthService;

impl AuthService {
    /// Registers a new account with the `user` role.
    ///
    /// Email uniqueness is checked before username uniqueness. A concurrent
    /// signup that wins the race is reported the same way by the store.
    #[instrument(skip(accounts, password_config, dto), fields(username = %dto.username))]
    pub async fn signup(
        accounts: &dyn AccountStore,
        password_config: &PasswordConfig,
        dto: SignupDto,
    ) -> Result<MessageResponse, AppError> {
        if accounts
            .find_by_email(&dto.email)
            .await
            .map_err(|e| AppError::storage("Failed to look up account", e))?
            .is_some()
        {
            return Err(duplicate_error("email"));
        }

        if accounts
            .find_by_username(&dto.username)
            .await
            .map_err(|e| AppError::storage("Failed to look up account", e))?
            .is_some()
        {
            return Err(duplicate_error("username"));
        }

        let password_hash = hash_password_with_cost(&dto.password, password_config.bcrypt_cost)?;

        let account = NewAccount {
            id: Uuid::new_v4(),
            username: dto.username,
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
            password_hash,
            role: Role::User,
        };

        match accounts.insert(account).await {
            Ok(account) => {
                tracing::info!(account_id = %account.id, "account registered");
                Ok(MessageResponse::new("User registered successfully"))
            }
            Err(StoreError::Duplicate(field)) => Err(duplicate_error(field)),
            Err(e) => Err(AppError::storage("Failed to create account", e)),
        }
    }

    /// Exchanges credentials for a session token.
    ///
    /// An unknown identifier and a wrong password produce the same error.
    #[instrument(skip(accounts, jwt, dto))]
    pub async fn login(
        accounts: &dyn AccountStore,
        jwt: &JwtKeys,
        dto: LoginRequest,
        now: i64,
    ) -> Result<LoginResponse, AppError> {
        let identifiers = dto.identifiers();
        if identifiers.is_empty() {
            return Err(AppError::bad_request(anyhow!("Username or email is required")));
        }

        let mut found = None;
        for identifier in identifiers {
            found = accounts
                .find_by_identifier(identifier)
                .await
                .map_err(|e| AppError::storage("Failed to look up account", e))?;
            if found.is_some() {
                break;
            }
        }
        let account = found.ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !verify_password(&dto.password, &account.password_hash)? {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = jwt.issue(&account.id.to_string(), account.role.as_str(), now)?;

        Ok(LoginResponse {
            token,
            role: account.role,
            username: account.username,
            first_name: account.first_name,
            last_name: account.last_name,
        })
    }
}
