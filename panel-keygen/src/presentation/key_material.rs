use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query, State};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::domain::key_material::{EncapsulationKeyPair, KeyPair, RealityKeyMaterial};
use crate::domain::short_id::ShortId;

use super::api_response::{respond, ApiError, ApiResult};
use super::AppState;

#[derive(Deserialize)]
pub struct PublicKeyRequest {
    pub private_key: String,
}

#[derive(Serialize, Deserialize)]
pub struct PublicKeyResponse {
    pub public_key: String,
}

#[derive(Deserialize)]
pub struct ShortIdQuery {
    pub count: Option<usize>,
}

#[derive(Serialize, Deserialize)]
pub struct ShortIdsResponse {
    pub short_ids: Vec<ShortId>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RealityRequest {
    pub short_id_count: Option<usize>,
    pub private_key: Option<String>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/keys/x25519", post(generate_x25519))
        .route("/keys/x25519/public", post(derive_x25519_public_key))
        .route("/keys/mlkem768", post(generate_mlkem768))
        .route("/short-ids", get(generate_short_ids))
        .route("/reality", post(generate_reality))
}

fn check_short_id_count(count: usize, max: usize) -> Result<usize, ApiError> {
    if count > max {
        return Err(ApiError::Validation(format!(
            "count must be at most {max}, got {count}"
        )));
    }
    Ok(count)
}

async fn generate_x25519(State(state): State<Arc<AppState>>) -> ApiResult<KeyPair> {
    respond(state.service.generate_key_pair().map_err(ApiError::from))
}

async fn derive_x25519_public_key(
    State(state): State<Arc<AppState>>,
    req: Result<Json<PublicKeyRequest>, JsonRejection>,
) -> ApiResult<PublicKeyResponse> {
    let result = req.map_err(ApiError::from).and_then(|Json(req)| {
        state
            .service
            .public_key_from_private(&req.private_key)
            .map(|public_key| PublicKeyResponse { public_key })
            .map_err(ApiError::from)
    });
    respond(result)
}

async fn generate_mlkem768(State(state): State<Arc<AppState>>) -> ApiResult<EncapsulationKeyPair> {
    let result = state
        .service
        .generate_encapsulation_key_pair()
        .await
        .map_err(ApiError::from);
    respond(result)
}

async fn generate_short_ids(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ShortIdQuery>, QueryRejection>,
) -> ApiResult<ShortIdsResponse> {
    let result = query
        .map_err(ApiError::from)
        .and_then(|Query(query)| {
            check_short_id_count(query.count.unwrap_or(1), state.max_short_ids)
        })
        .and_then(|count| {
            if count == 0 {
                return Err(ApiError::Validation("count must be at least 1".to_string()));
            }
            let short_ids = state.service.generate_short_ids(count)?;
            Ok(ShortIdsResponse { short_ids })
        });
    respond(result)
}

async fn generate_reality(
    State(state): State<Arc<AppState>>,
    req: Result<Json<RealityRequest>, JsonRejection>,
) -> ApiResult<RealityKeyMaterial> {
    let result = req.map_err(ApiError::from).and_then(|Json(req)| {
        let count = check_short_id_count(req.short_id_count.unwrap_or(1), state.max_short_ids)?;
        state
            .service
            .reality_key_material(count, req.private_key.as_deref())
            .map_err(ApiError::from)
    });
    respond(result)
}
