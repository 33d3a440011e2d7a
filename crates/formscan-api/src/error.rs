use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use formscan_core::{ErrorKind, FormscanError};
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into(), details: None }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into(), details: None }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self { status: StatusCode::CONFLICT, message: message.into(), details: None }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into(), details: None }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.message, details: self.details };
        (self.status, Json(body)).into_response()
    }
}

impl From<FormscanError> for ApiError {
    fn from(err: FormscanError) -> Self {
        let details = err.reason();
        match err.kind() {
            ErrorKind::Validation => Self::bad_request("Validation failed").with_details(details),
            ErrorKind::Geometry => Self::bad_request("Invalid geometry").with_details(details),
            ErrorKind::NotFound => Self::not_found("Not found").with_details(details),
            ErrorKind::Conflict => Self::conflict("Conflict").with_details(details),
            ErrorKind::Internal => {
                tracing::error!(error = %err, "Request failed");
                Self::internal("Internal error").with_details(details)
            }
        }
    }
}
