use axum::{Router, routing::patch};

use super::controller::promote_user;
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new().route("/promote/{username}", patch(promote_user))
}
