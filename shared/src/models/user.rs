//! Staff User Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;

/// Staff user (without password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: i64,
}
