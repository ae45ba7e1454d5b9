use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use opti26_prep::error::PrepError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The optimizer exited without writing its output file
    #[error("Error: Output file not created. CLI Output: {stdout}")]
    OutputNotCreated { stdout: String },

    #[error("System Error: {0}")]
    System(String),
}

impl From<PrepError> for ApiError {
    fn from(error: PrepError) -> Self {
        ApiError::System(error.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        ApiError::System(error.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(error: std::io::Error) -> Self {
        ApiError::System(error.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::System(error.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::System(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
