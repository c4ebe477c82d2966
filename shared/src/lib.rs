//! Shared types for BuffetPOS
//!
//! Wire models and request/response payloads used by the server and by clients
//! talking to it. No I/O lives here.

pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use models::{DiningTable, Role, TableStatus, UnknownRole, UserDetail};
pub use serde::{Deserialize, Serialize};
