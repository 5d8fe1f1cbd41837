use std::env;

/// Matches `bcrypt::DEFAULT_COST`.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

#[derive(Clone, Debug)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self {
            // bcrypt accepts costs 4..=31
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|cost| (4..=31).contains(cost))
                .unwrap_or(DEFAULT_BCRYPT_COST),
        }
    }
}
