//! HTTP error response mapping.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use pagekit_domain::error::{NotFoundError, PageKitError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`PageKitError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(PageKitError);

impl ApiError {
    /// A 404 for `entity` addressed by `id`.
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self(NotFoundError::new(entity, id).into())
    }

    fn malformed(message: String) -> Self {
        Self(ValidationError::MalformedBody(message).into())
    }
}

impl From<PageKitError> for ApiError {
    fn from(err: PageKitError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::malformed(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::malformed(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::malformed(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PageKitError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            PageKitError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            PageKitError::Storage(err) => {
                tracing::error!(error = ?err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
