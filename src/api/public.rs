//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::ai::ReplayError;

/// Returned to clients for every 500. The underlying error is only
/// logged.
pub const GENERIC_ERROR: &str = "Something went wrong!";

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

// Errors

pub enum ApiError {
    /// The request can't be served as sent, reported back verbatim.
    BadRequest(String),
    /// Already logged with the full error chain when it was raised.
    Internal,
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                tracing::debug!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: msg })).into_response()
            }
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: GENERIC_ERROR.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`. Logs the
/// full error chain in the span of the caller.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("{:#}", err);
        Self::Internal
    }
}

impl From<ReplayError> for ApiError {
    fn from(err: ReplayError) -> Self {
        if err.is_invalid_input() {
            Self::BadRequest(err.to_string())
        } else {
            Self::from(anyhow::Error::new(err))
        }
    }
}

// Re-export public types from each route

pub mod bot {
    pub use crate::api::routes::bot::public::*;
}
