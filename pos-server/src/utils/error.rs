//! Unified error handling
//!
//! [`AppError`] is the closed set of failures a request can end with. Every
//! variant maps to exactly one status code in [`IntoResponse`]; the body is
//! always `{"error": "<message>"}`.
//!
//! | Variant | Status | Message |
//! |---------|--------|---------|
//! | `Unauthenticated` | 401 | Unauthorized |
//! | `InvalidCredentials` | 401 | Invalid email or password |
//! | `Forbidden` | 403 | caller supplied |
//! | `NotFound` | 404 | `<resource> not found` |
//! | `DuplicateName` | 400 | Table name already exists |
//! | `AlreadyAssigned` | 400 | Table already assigned |
//! | `NotAssigned` | 400 | Table is not assigned |
//! | `TableOccupied` | 400 | Table is occupied |
//! | `DuplicateEmail` | 400 | Email already exists |
//! | `Validation` | 400 | caller supplied |
//! | `Unavailable` | 503 | Service temporarily unavailable |
//! | `Database` / `Internal` | 500 | generic, detail only logged |
//!
//! # Example
//!
//! ```ignore
//! Err(AppError::not_found("Table"))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::response::ErrorResponse;
use tracing::error;

use crate::db::repository::RepoError;

/// Application error
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication / authorization ==========
    /// Missing, malformed, invalid or expired credential or access code (401)
    #[error("Unauthorized")]
    Unauthenticated,

    /// Wrong email or password at login (401)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Valid identity without a qualifying role (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business errors ==========
    /// Referenced resource does not exist (404)
    #[error("{0} not found")]
    NotFound(String),

    /// Another live table already uses the name (400)
    #[error("Table name already exists")]
    DuplicateName,

    /// Assign on a table that is already occupied (400)
    #[error("Table already assigned")]
    AlreadyAssigned,

    /// Release on a table that is free (400)
    #[error("Table is not assigned")]
    NotAssigned,

    /// Delete on a table with an active session (400)
    #[error("Table is occupied")]
    TableOccupied,

    /// Registration with an email that is taken (400)
    #[error("Email already exists")]
    DuplicateEmail,

    /// Request body or path failed validation (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    // ========== System errors ==========
    /// Store did not answer in time; the caller may retry later (503)
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Database failure (500)
    #[error("Database error: {0}")]
    Database(String),

    /// Anything else (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Unavailable(msg) => {
                error!(target: "database", error = %msg, "Store unavailable");
            }
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
            }
            _ => {}
        }

        let body = Json(ErrorResponse {
            error: self.public_message(),
        });
        (self.status(), body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Duplicate(msg) => AppError::Validation(msg),
            RepoError::Timeout => AppError::Unavailable("database pool timed out".to_string()),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status this error is answered with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateName
            | AppError::AlreadyAssigned
            | AppError::NotAssigned
            | AppError::TableOccupied
            | AppError::DuplicateEmail
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client; system failures never leak detail
    pub fn public_message(&self) -> String {
        match self {
            AppError::Forbidden(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Unavailable(_) => "Service temporarily unavailable".to_string(),
            AppError::Database(_) => "Database error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
