use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use wra_core::{Error, ResearchRequest, ResultSet};

use crate::AppState;

/// Error shape returned by every failing endpoint: an HTTP status plus a
/// human-readable message under `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Fetch(_) | Error::Http(_) | Error::Parse(_) => StatusCode::BAD_GATEWAY,
            Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub async fn research(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResearchRequest>,
) -> Result<Json<ResultSet>, ApiError> {
    let result = state.pipeline.run(&request).await.map_err(|e| {
        error!("research request for '{}' failed: {}", request.topic, e);
        ApiError::from(e)
    })?;
    Ok(Json(result))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
