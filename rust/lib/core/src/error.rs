use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Clients match on these,
// never on the human-readable `error` string.

/// Stable error code constants.
///
/// Clients should match on `code` from `{"error": "...", "code": "NOT_FOUND"}`.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const INTERNAL: &str = "INTERNAL";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

/// Message returned for every 5xx. The real cause only goes to the log.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Message returned for every 400 alongside the `details` list.
pub const VALIDATION_MESSAGE: &str = "Validation error";

// ── FieldError ──────────────────────────────────────────────────────

/// One field-level validation problem.
///
/// `path` names the offending field (`["price"]`). It is empty when the
/// problem concerns the body as a whole, e.g. a body that is not an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: Vec<String>,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: vec![field.into()],
            message: message.into(),
        }
    }

    /// An error about the request body itself rather than one field.
    pub fn body(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// The top-level field this error is about, if any.
    pub fn field(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

fn join_details(details: &[FieldError]) -> String {
    details
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type.
///
/// Each variant maps to a stable error code (see [`error_code`]) and an
/// HTTP status code. Validation errors carry their field-level details:
///
/// ```json
/// {"error": "Validation error", "code": "VALIDATION_FAILED",
///  "details": [{"path": ["title"], "message": "Title is required"}]}
/// ```
///
/// Storage and internal errors never expose their message to the caller.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Resource does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Input failed schema checks. HTTP 400.
    #[error("{}", join_details(.0))]
    Validation(Vec<FieldError>),

    /// Duplicate identifier. HTTP 409.
    #[error("{0}")]
    Conflict(String),

    /// Storage backend failure. HTTP 500.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::Conflict(_) => error_code::ALREADY_EXISTS,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent to the caller.
    pub fn body(&self) -> serde_json::Value {
        match self {
            ServiceError::Validation(details) => serde_json::json!({
                "error": VALIDATION_MESSAGE,
                "code": self.error_code(),
                "details": details,
            }),
            ServiceError::Storage(_) | ServiceError::Internal(_) => serde_json::json!({
                "error": INTERNAL_MESSAGE,
                "code": self.error_code(),
            }),
            ServiceError::NotFound(msg) | ServiceError::Conflict(msg) => serde_json::json!({
                "error": msg,
                "code": self.error_code(),
            }),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), "request failed: {}", self);
        }
        (status, axum::Json(self.body())).into_response()
    }
}
