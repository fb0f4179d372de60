//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::{ErrorKind, ServiceError};

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling (a rule code for business rule violations)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Malformed request payload rejected before reaching a service
    BadRequest(String),
    /// Error returned by a service call
    Service(ServiceError),
}

impl AppError {
    /// Status code and body of this error.
    pub fn to_parts(&self) -> (StatusCode, ApiError) {
        match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("VALIDATION_FAILED", msg.clone()),
            ),
            AppError::Service(err) => match err.kind() {
                ErrorKind::NotFound => (
                    StatusCode::NOT_FOUND,
                    ApiError::new("NOT_FOUND", err.to_string()),
                ),
                ErrorKind::ValidationFailed => (
                    StatusCode::BAD_REQUEST,
                    ApiError::new("VALIDATION_FAILED", err.to_string()),
                ),
                ErrorKind::BusinessRuleViolation => {
                    let code = err
                        .rule_code()
                        .map(|c| c.as_str())
                        .unwrap_or("BUSINESS_RULE_VIOLATION");
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        ApiError::new(code, err.to_string()),
                    )
                }
                ErrorKind::Internal => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("INTERNAL_ERROR", "internal error").with_details(err.to_string()),
                ),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.to_parts();
        if status.is_server_error() {
            let cause = error.details.as_deref().unwrap_or(&error.message);
            tracing::error!("Request failed: {}", cause);
        }
        (status, Json(error)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError::Service(err)
    }
}
