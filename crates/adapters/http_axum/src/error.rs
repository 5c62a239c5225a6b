//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use scootrent_domain::error::ScootRentError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`ScootRentError`] to an HTTP response with the appropriate status.
pub struct ApiError(ScootRentError);

impl From<ScootRentError> for ApiError {
    fn from(err: ScootRentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ScootRentError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ScootRentError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            ScootRentError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            ScootRentError::Unavailable(err) => {
                tracing::warn!(error = %err, "upstream dependency unavailable");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            ScootRentError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
