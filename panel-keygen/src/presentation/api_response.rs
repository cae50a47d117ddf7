use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application_service::key_material_service::KeyMaterialError;

/// Error body shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ApiError {
    /// Malformed input, e.g. a private key that does not decode (400)
    Validation(String),
    /// Key generation itself failed (500)
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<KeyMaterialError> for ApiError {
    fn from(e: KeyMaterialError) -> Self {
        match e {
            KeyMaterialError::Decode(_)
            | KeyMaterialError::InvalidKey(_)
            | KeyMaterialError::TooManyShortIds { .. } => {
                ApiError::Validation(e.to_string())
            }
            KeyMaterialError::KeyGeneration(_) => {
                ApiError::Internal(format!("could not generate key pair: {e}"))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(format!("invalid query string: {}", rejection.body_text()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub trace_id: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, trace_id: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            trace_id,
        }
    }

    pub fn error(error: ApiError, trace_id: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            trace_id,
        }
    }
}

pub type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

/// Wraps a handler outcome in the response envelope, logging failures
/// against the trace id.
pub fn respond<T>(result: Result<T, ApiError>) -> ApiResult<T> {
    let trace_id = generate_trace_id();
    match result {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::success(data, trace_id))),
        Err(error) => {
            let status = error.status_code();
            if status.is_server_error() {
                tracing::error!(%trace_id, ?error, "request failed");
            } else {
                tracing::warn!(%trace_id, ?error, "request rejected");
            }
            (status, Json(ApiResponse::error(error, trace_id)))
        }
    }
}

/// `trace_` followed by 16 hex characters.
pub fn generate_trace_id() -> String {
    format!("trace_{}", &Uuid::new_v4().simple().to_string()[..16])
}
