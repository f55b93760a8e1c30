use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::EffectiveConfig;
use crate::http::server::AppState;
use crate::routing::ViewRef;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub name: String,
    pub path: String,
    pub view: ViewRef,
}

pub async fn get_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

pub async fn get_config(State(state): State<AppState>) -> Json<EffectiveConfig> {
    Json(state.effective.as_ref().clone())
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    let routes = state
        .routes
        .entries()
        .iter()
        .map(|entry| RouteSummary {
            name: entry.name.clone(),
            path: entry.pattern().to_string(),
            view: entry.view,
        })
        .collect();
    Json(routes)
}
