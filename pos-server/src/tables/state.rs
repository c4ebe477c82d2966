//! Table lifecycle state machine
//!
//! ```text
//!          assign
//!   Free ─────────▶ Occupied
//!        ◀─────────
//!          release
//! ```
//!
//! Each [`Transition`] names the single status it may start from. The
//! repository turns that into the `WHERE status = ?` guard of a conditional
//! UPDATE, so the check and the write happen in one statement and two racing
//! requests cannot both succeed.

use shared::TableStatus;
use thiserror::Error;

use crate::utils::AppError;

/// Status-changing operation on a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Free → Occupied, mints an access code
    Assign,
    /// Occupied → Free, clears the access code
    Release,
}

/// Rejected transition; the table is left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("table already assigned")]
    AlreadyAssigned,
    #[error("table is not assigned")]
    NotAssigned,
}

impl Transition {
    /// The only status this transition may start from
    pub fn source(self) -> TableStatus {
        match self {
            Transition::Assign => TableStatus::Free,
            Transition::Release => TableStatus::Occupied,
        }
    }

    /// Status after a successful transition
    pub fn target(self) -> TableStatus {
        match self {
            Transition::Assign => TableStatus::Occupied,
            Transition::Release => TableStatus::Free,
        }
    }

    /// Whether the resulting state carries an access code
    pub fn issues_code(self) -> bool {
        self.target().is_occupied()
    }

    /// Decide the transition against a known current status
    pub fn apply(self, current: TableStatus) -> Result<TableStatus, TransitionError> {
        if current == self.source() {
            Ok(self.target())
        } else {
            Err(self.rejection())
        }
    }

    /// Error reported when the table is not in [`Self::source`]
    pub fn rejection(self) -> TransitionError {
        match self {
            Transition::Assign => TransitionError::AlreadyAssigned,
            Transition::Release => TransitionError::NotAssigned,
        }
    }
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::AlreadyAssigned => AppError::AlreadyAssigned,
            TransitionError::NotAssigned => AppError::NotAssigned,
        }
    }
}

/// Deletion is terminal and only allowed while no customer session is bound
pub fn ensure_deletable(status: TableStatus) -> Result<(), AppError> {
    match status {
        TableStatus::Free => Ok(()),
        TableStatus::Occupied => Err(AppError::TableOccupied),
    }
}
