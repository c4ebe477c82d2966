//! Utilities - shared helpers and types
//!
//! - [`AppError`] - application error type
//! - [`ValidatedJson`] - validating JSON extractor
//! - logging setup

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::AppError;
pub use result::AppResult;
pub use validation::{ValidatedJson, parse_uuid};

use shared::response::MessageResponse;

/// `{"message": ...}` success body for mutating endpoints
pub fn message(text: impl Into<String>) -> axum::Json<MessageResponse> {
    axum::Json(MessageResponse::new(text))
}
