use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::application_service::key_material_service::DefaultKeyMaterialService;
use crate::config::ServerConfig;

pub mod api_response;
pub mod key_material;

pub struct AppState {
    pub service: DefaultKeyMaterialService,
    pub max_short_ids: usize,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn create_router(config: &ServerConfig) -> Router {
    let state = Arc::new(AppState {
        service: DefaultKeyMaterialService::default(),
        max_short_ids: config.max_short_ids,
    });

    Router::new()
        .route("/health", get(health_check))
        .merge(key_material::routes())
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
