//! Maps domain `AppError` to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use adboard_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `"error"`.
    pub status: String,
    /// Human-readable message.
    pub message: String,
    /// Optional structured details (field-keyed validation messages).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error type returned by handlers and extractors.
///
/// Wraps the domain error with optional structured details so request
/// validation failures can report per-field messages. Everything else
/// converts via `From<AppError>` and carries no details.
#[derive(Debug)]
pub struct ApiError {
    /// Underlying domain error.
    pub error: AppError,
    /// Field-keyed messages for validation failures.
    pub details: Option<serde_json::Value>,
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            details: None,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self {
            error: AppError::validation("Request validation failed"),
            details: Some(field_messages(&errors)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.kind {
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::InvalidCredentials
            | ErrorKind::TokenNotFound
            | ErrorKind::TokenExpired
            | ErrorKind::TokenReused
            | ErrorKind::UserNotFound
            | ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Configuration
            | ErrorKind::Database
            | ErrorKind::Cache
            | ErrorKind::Serialization
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Server-side failures keep their real cause in the logs and
        // present a generic message to clients.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.error, "Internal server error");
            "Internal server error".to_string()
        } else {
            self.error.message.clone()
        };

        let body = ApiErrorResponse {
            status: "error".to_string(),
            message,
            details: self.details,
        };

        (status, Json(body)).into_response()
    }
}

/// Collapse `validator` output into `{"field": ["message", ...]}`.
fn field_messages(errors: &ValidationErrors) -> serde_json::Value {
    let mut fields = serde_json::Map::new();
    for (field, entries) in errors.field_errors() {
        let messages = entries
            .iter()
            .map(|entry| {
                let text = entry
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| entry.code.to_string());
                serde_json::Value::String(text)
            })
            .collect();
        fields.insert(field.to_string(), serde_json::Value::Array(messages));
    }
    serde_json::Value::Object(fields)
}
