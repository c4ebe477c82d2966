//! Dining tables
//!
//! - [`state`] - Free/Occupied state machine
//! - [`coordinator`] - [`TableService`], CRUD and the assign/release protocol

pub mod coordinator;
pub mod state;

pub use coordinator::TableService;
pub use state::{Transition, TransitionError};
