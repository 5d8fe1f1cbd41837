//! Feature modules. Each has a `controller` (HTTP handlers), a `service`
//! (business rules over the store traits) and a `router`.

pub mod auth;
pub mod plants;
pub mod users;
