//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use gridgate_domain::error::ValidationError;

/// JSON error body, `{"error": "..."}`.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Everything a chart handler can refuse a request with.
///
/// Every variant renders as an [`ErrorBody`], so clients always get JSON.
#[derive(Debug)]
pub enum ApiError {
    /// Input parsed but failed a domain check.
    Validation(ValidationError),
    /// An extractor could not parse the path or the query string.
    Malformed { status: StatusCode, message: String },
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            // answered in-band, the body carries the error
            Self::Validation(err @ ValidationError::InvalidSelector) => {
                (StatusCode::OK, err.to_string())
            }
            Self::Validation(
                err @ (ValidationError::UnknownLocation(_)
                | ValidationError::OutOfRange { .. }
                | ValidationError::InvalidDate(_)),
            ) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Malformed { status, message } => (status, message),
        };
        tracing::debug!(%status, %error, "rejected request");

        (status, Json(ErrorBody { error })).into_response()
    }
}
