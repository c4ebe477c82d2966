//! Data models
//!
//! Shared between the server and its clients (via API).
//! Table and user IDs are UUID v4; timestamps are UTC milliseconds.

pub mod dining_table;
pub mod role;
pub mod user;

// Re-exports
pub use dining_table::*;
pub use role::*;
pub use user::*;
