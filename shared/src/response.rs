//! Response payloads
//!
//! Mutating endpoints answer `{"message": ...}`, queries answer the resource
//! itself, failures answer `{"error": ...}`.

use serde::{Deserialize, Serialize};

use crate::models::UserDetail;

/// Success envelope for mutating operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /auth/login result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: UserDetail,
}
