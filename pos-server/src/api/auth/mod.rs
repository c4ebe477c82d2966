//! Staff account API
//!
//! `/auth/*` is public and only ever creates employees; `/manage/staff` is
//! manager-only and can grant any role.

mod handler;

use axum::{Router, middleware, routing::post};
use shared::Role;

use crate::auth::{RoleGate, require_role, require_staff_auth};
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route("/auth/register", post(handler::register))
        .route("/auth/login", post(handler::login))
        .nest("/manage/staff", manage_routes(state))
}

fn manage_routes(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create_staff))
        .layer(middleware::from_fn_with_state(
            RoleGate::new([Role::Manager]),
            require_role,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_staff_auth,
        ))
}
