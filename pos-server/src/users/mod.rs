//! Staff accounts

pub mod password;
pub mod service;

pub use service::UserService;
