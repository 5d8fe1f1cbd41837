//! Authentication and authorization middleware.
//!
//! Protected routes run two stages in order:
//!
//! 1. [`auth::authenticate`] validates the session token from the
//!    `Authorization` header and attaches an [`auth::AuthUser`] to the request
//! 2. [`role::require_admin`] rejects principals whose token role is not `admin`
//!
//! Neither stage consults the account store; the token's claims are the only
//! source of identity and role.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::post};
//! use crate::middleware::{auth::authenticate, role::require_admin};
//!
//! let admin_routes = Router::new()
//!     .route("/plants", post(create_plant))
//!     .route_layer(middleware::from_fn(require_admin))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));
//! ```

pub mod auth;
pub mod role;
