//! Signup and login.

pub mod controller;
pub mod router;
pub mod service;
