//! Application error type shared by every layer.
//!
//! [`AppError`] carries a human-readable message plus structured `details`
//! and renders itself as a JSON body:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short URL not found", "details": { "code": "abc123" } } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The submitted URL is missing or not an absolute URL.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// No record exists for the requested short code.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// A unique constraint (`short_code` or `original_url`) rejected an insert.
    #[error("{message}")]
    DuplicateKey { message: String, details: Value },

    /// Every candidate code collided with an existing one.
    #[error("{message}")]
    GenerationExhausted { message: String, details: Value },

    /// Persistence failure: connectivity, timeouts, unexpected races.
    #[error("{message}")]
    Store { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn duplicate_key(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateKey {
            message: message.into(),
            details,
        }
    }
    pub fn generation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::GenerationExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }

    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidUrl { .. } => (StatusCode::BAD_REQUEST, "invalid_url"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::DuplicateKey { .. } => (StatusCode::CONFLICT, "duplicate_key"),
            AppError::GenerationExhausted { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "generation_exhausted",
            ),
            AppError::Store { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        let (message, details) = match self {
            AppError::InvalidUrl { message, details }
            | AppError::NotFound { message, details }
            | AppError::DuplicateKey { message, details }
            | AppError::GenerationExhausted { message, details }
            | AppError::Store { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            let constraint = db.constraint();
            return AppError::duplicate_key(
                "Unique constraint violation",
                json!({
                    "constraint": constraint,
                    "field": constraint.and_then(constrained_field),
                }),
            );
        }

        tracing::error!("Database error: {}", e);
        AppError::store("Database error", json!({ "reason": e.to_string() }))
    }
}

/// Column guarded by a `urls` unique constraint.
fn constrained_field(constraint: &str) -> Option<&'static str> {
    match constraint {
        "urls_short_code_key" => Some("short_code"),
        "urls_url_hash_key" => Some("original_url"),
        _ => None,
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = Map::new();
        let mut first_message = None;

        for (field, field_errors) in errors.field_errors() {
            let codes: Vec<Value> = field_errors
                .iter()
                .map(|e| Value::String(e.code.to_string()))
                .collect();

            if first_message.is_none() {
                first_message = field_errors
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()));
            }

            fields.insert(field.to_string(), Value::Array(codes));
        }

        AppError::invalid_url(
            first_message.unwrap_or_else(|| "Invalid request".to_string()),
            Value::Object(fields),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::invalid_url("bad", json!({})).status_and_code().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("missing", json!({})).status_and_code().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::generation_exhausted("full", json!({}))
                .status_and_code()
                .0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::store("down", json!({})).status_and_code().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::not_found("Short URL not found", json!({ "code": "abc" }));
        assert_eq!(err.to_string(), "Short URL not found");
    }

    #[test]
    fn test_error_info_keeps_details() {
        let info = AppError::invalid_url("Invalid URL format", json!({ "url": "nope" }))
            .to_error_info();

        assert_eq!(info.code, "invalid_url");
        assert_eq!(info.message, "Invalid URL format");
        assert_eq!(info.details["url"], "nope");
    }

    #[test]
    fn test_constrained_field() {
        assert_eq!(constrained_field("urls_short_code_key"), Some("short_code"));
        assert_eq!(constrained_field("urls_url_hash_key"), Some("original_url"));
        assert_eq!(constrained_field("other_key"), None);
    }
}
