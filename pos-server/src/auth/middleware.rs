//! Authentication middleware
//!
//! Axum middleware for the two identity kinds:
//!
//! | Layer | Header | Inserts | Failure |
//! |-------|--------|---------|---------|
//! | [`require_staff_auth`] | `Authorization: Bearer <jwt>` | [`CurrentUser`] | 401 |
//! | [`require_role`] | (needs `CurrentUser`) | - | 403 |
//! | [`require_access_code`] | `AccessCode: <code>` | [`CustomerTable`] | 401 |
//!
//! Staff routes stack `require_role` inside `require_staff_auth`, so a request
//! with a bad credential is rejected before any role is looked at.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use shared::util::now_millis;

use super::access_code::{ACCESS_CODE_HEADER, AccessCodeVerifier, CustomerTable};
use super::{CurrentUser, JwtService, RoleGate};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Resolve the staff identity from the `Authorization` header
pub(crate) fn authenticate_staff(
    jwt_service: &JwtService,
    headers: &HeaderMap,
    path: &str,
) -> Result<CurrentUser, AppError> {
    let Some(auth_header) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        security_log!("WARN", "auth_missing", path = path.to_string());
        return Err(AppError::Unauthenticated);
    };

    let Some(token) = JwtService::extract_from_header(auth_header) else {
        security_log!("WARN", "auth_malformed", path = path.to_string());
        return Err(AppError::Unauthenticated);
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => Ok(CurrentUser::from(claims)),
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                path = path.to_string()
            );
            Err(AppError::Unauthenticated)
        }
    }
}

/// Resolve the customer's table from the access-code header
pub(crate) async fn authenticate_customer(
    verifier: &AccessCodeVerifier,
    headers: &HeaderMap,
    path: &str,
) -> Result<CustomerTable, AppError> {
    let Some(code) = headers
        .get(ACCESS_CODE_HEADER)
        .and_then(|h| h.to_str().ok())
    else {
        security_log!("WARN", "access_code_missing", path = path.to_string());
        return Err(AppError::Unauthenticated);
    };

    verifier.verify(code, now_millis()).await
}

/// Staff authentication; inserts [`CurrentUser`] into request extensions
pub async fn require_staff_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate_staff(&state.get_jwt_service(), req.headers(), req.uri().path())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Role check against the [`RoleGate`] given as layer state
///
/// ```ignore
/// Router::new()
///     .route("/manage/tables", get(handler::list))
///     .layer(middleware::from_fn_with_state(gate, require_role))
///     .layer(middleware::from_fn_with_state(state, require_staff_auth));
/// ```
pub async fn require_role(
    State(gate): State<RoleGate>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthenticated)?;

    gate.authorize(user)?;
    Ok(next.run(req).await)
}

/// Customer authentication; inserts [`CustomerTable`] into request extensions
pub async fn require_access_code(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let table = authenticate_customer(&state.access_codes, req.headers(), req.uri().path()).await?;
    req.extensions_mut().insert(table);
    Ok(next.run(req).await)
}
