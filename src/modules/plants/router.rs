use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::controller::{
    create_plant, delete_plant, delete_plants_by_name, list_plants, search_plants, update_plant,
};
use crate::middleware::{auth::authenticate, role::require_admin};
use crate::state::AppState;

/// Reads are public; every write goes through the authentication and admin gates.
pub fn init_plants_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", post(create_plant))
        .route("/{plant_id}", put(update_plant).delete(delete_plant))
        .route("/delete-by-name/{name}", delete(delete_plants_by_name))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    Router::new()
        .route("/", get(list_plants))
        .route("/search", get(search_plants))
        .merge(admin_routes)
}
