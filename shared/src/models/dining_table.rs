//! Dining Table Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Occupancy state of a dining table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Free,
    Occupied,
}

impl TableStatus {
    /// Storage representation
    pub fn as_db(&self) -> &'static str {
        match self {
            TableStatus::Free => "free",
            TableStatus::Occupied => "occupied",
        }
    }

    /// Parse the storage representation
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "free" => Some(TableStatus::Free),
            "occupied" => Some(TableStatus::Occupied),
            _ => None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, TableStatus::Occupied)
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_db())
    }
}

/// Dining table entity
///
/// `access_code` is present exactly while the table is [`TableStatus::Occupied`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub status: TableStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
    /// When the current occupancy session started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl DiningTable {
    /// Whether the occupancy/code pairing holds for this snapshot
    pub fn is_consistent(&self) -> bool {
        let has_code = self.access_code.as_deref().is_some_and(|c| !c.is_empty());
        has_code == self.status.is_occupied()
    }
}
