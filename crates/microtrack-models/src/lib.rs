//! # MicroTrack Models
//!
//! Data structures shared across the MicroTrack API: database rows, request
//! DTOs with their validation rules, and response bodies.
//!
//! - [`accounts`]: Accounts, roles, signup and login payloads
//! - [`plants`]: Plant records, create/update payloads, search parameters

pub mod accounts;
pub mod plants;

// Re-export commonly used types at crate root for convenience
pub use accounts::{
    Account, LoginRequest, LoginResponse, NewAccount, Role, SignupDto, not_blank,
};

pub use plants::{
    CreatePlantDto, DeleteByNameResponse, HarvestDateOutOfRange, MAX_GROWTH_DAYS, NewPlant, Plant,
    PlantListResponse, PlantSearchParams, UpdatePlantDto, harvest_date_for,
};
