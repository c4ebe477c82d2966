//! Router assembly
//!
//! [`build_router`] merges the per-resource routers; [`build_app`] adds the
//! tower-http stack and binds the state.
//!
//! Layer order, outermost first:
//!
//! 1. `SetRequestIdLayer` / `PropagateRequestIdLayer` - `x-request-id`
//! 2. `TraceLayer`
//! 3. request logging
//! 4. `TimeoutLayer`
//! 5. `CorsLayer`
//! 6. per-group auth (staff bearer + role gate, or access code)

pub mod logging;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(api::health::router())
        .merge(api::auth::router(state))
        .merge(api::tables::router(state))
        .merge(api::customer::router(state))
}

pub fn build_app(state: ServerState) -> Router {
    let timeout = state.config.request_timeout();

    build_router(&state)
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(timeout))
        .layer(axum_middleware::from_fn(logging::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
