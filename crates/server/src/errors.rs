use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use service::errors::ServiceError;

/// HTTP-facing error: status code plus a message rendered as `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Request body could not be read as a JSON field map.
    pub fn malformed_body() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Content-Type must be application/json")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Class not found"),
        }
    }
}
