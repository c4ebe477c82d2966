//! HTTP API, one module per resource
//!
//! | Module | Prefix | Auth |
//! |--------|--------|------|
//! | [`health`] | `/`, `/health` | none |
//! | [`auth`] | `/auth`, `/manage/staff` | none; staff bearer token + manager for `/manage/staff` |
//! | [`tables`] | `/manage/tables` | staff bearer token + manage role |
//! | [`customer`] | `/customer` | access code |

pub mod auth;
pub mod customer;
pub mod health;
pub mod tables;
