//! Plant records: listing, search, and admin-only writes.

pub mod controller;
pub mod query;
pub mod router;
pub mod service;
