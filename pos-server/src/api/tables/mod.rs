//! Dining Table API (staff)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{require_role, require_staff_auth};
use crate::core::ServerState;

/// `/manage/tables`; bearer token first, then the manage role gate
pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/manage/tables", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::create)
                .put(handler::update),
        )
        .route("/assign", post(handler::assign))
        .route("/release", post(handler::release))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .layer(middleware::from_fn_with_state(
            state.manage_gate.clone(),
            require_role,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_staff_auth,
        ))
}
