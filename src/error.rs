//! Registry error types with HTTP status code mapping.
//!
//! [`RegistryError`] is the central error type for the service. Backend
//! failures are mapped onto a shared taxonomy (`Write`/`Read`/`NotFound`)
//! so the two storage implementations are indistinguishable to callers.
//! Each variant maps to a specific HTTP status code and structured JSON
//! error response.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "registration not found: 42",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`RegistryError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Central error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 2000–2999 | Not Found  | 404 Not Found             |
/// | 3000–3099 | Store      | 500 Internal Server Error |
/// | 3100–3199 | Migration  | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No registration exists with the given identity.
    #[error("registration not found: {0}")]
    NotFound(i64),

    /// Request validation failed. Raised by the HTTP surface, never by
    /// the store or lifecycle core.
    #[error("invalid request: {0}")]
    Validation(String),

    /// An insert, update or delete failed at the backend.
    #[error("store write failed: {0}")]
    Write(String),

    /// A query failed at the backend (distinct from not-found).
    #[error("store read failed: {0}")]
    Read(String),

    /// The migration target file does not exist. The migrator never
    /// creates a store from scratch.
    #[error("store not found at {}", .0.display())]
    StoreNotFound(PathBuf),

    /// The pre-migration backup copy could not be made; no schema
    /// change was attempted.
    #[error("backup failed: {0}")]
    Backup(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RegistryError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::NotFound(_) => 2001,
            Self::Write(_) => 3001,
            Self::Read(_) => 3002,
            Self::StoreNotFound(_) => 3101,
            Self::Backup(_) => 3102,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Write(_)
            | Self::Read(_)
            | Self::StoreNotFound(_)
            | Self::Backup(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = RegistryError::NotFound(7);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2001);
    }

    #[test]
    fn store_errors_map_to_500() {
        assert_eq!(
            RegistryError::Write("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RegistryError::Read("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_maps_to_400() {
        let err = RegistryError::Validation("missing playerName".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1001);
    }

    #[test]
    fn migration_errors_carry_distinct_codes() {
        let missing = RegistryError::StoreNotFound(PathBuf::from("/tmp/none.db"));
        let backup = RegistryError::Backup("copy failed".to_string());
        assert_eq!(missing.error_code(), 3101);
        assert_eq!(backup.error_code(), 3102);
    }
}
