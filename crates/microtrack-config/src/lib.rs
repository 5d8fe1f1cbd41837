//! # MicroTrack Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: Token signing secret and lifetime
//! - [`password`]: bcrypt work factor
//! - [`database`]: PostgreSQL connection target and pool limits
//! - [`cors`]: Allowed browser origins
//!
//! # Example
//!
//! ```ignore
//! use microtrack_config::{CorsConfig, DatabaseConfig, JwtConfig, PasswordConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let database_config = DatabaseConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod password;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
