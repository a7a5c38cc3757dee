use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Failures surfaced by the HTTP handlers. The client always gets the same
/// generic plain-text body; the cause goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("profile read failed: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Store(cause) => {
                error!(error = %cause, "can't fetch data");
                (StatusCode::INTERNAL_SERVER_ERROR, "can't fetch data").into_response()
            }
        }
    }
}
