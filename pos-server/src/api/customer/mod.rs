//! Customer API
//!
//! Authenticated by the access code alone; every route works on the table
//! the code is bound to and takes no table id from the request.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_access_code;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route("/customer/tables", get(handler::current_table))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_code,
        ))
}
