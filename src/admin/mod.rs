//! Dev server introspection endpoints under `/__dev/`.
//!
//! Matched before the route table, so a route declared at one of these
//! paths is shadowed.

pub mod handlers;

use axum::{routing::get, Router};

use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router() -> Router<AppState> {
    Router::new()
        .route("/__dev/health", get(get_health))
        .route("/__dev/config", get(get_config))
        .route("/__dev/routes", get(get_routes))
}
