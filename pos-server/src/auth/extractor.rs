//! Identity extractors
//!
//! Handlers take [`CurrentUser`] or [`CustomerTable`] as arguments. The value
//! set by middleware is reused; without it the headers are verified here.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::CurrentUser;
use super::access_code::CustomerTable;
use super::middleware::{authenticate_customer, authenticate_staff};
use crate::core::ServerState;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let user = authenticate_staff(&state.get_jwt_service(), &parts.headers, parts.uri.path())?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

impl FromRequestParts<ServerState> for CustomerTable {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(table) = parts.extensions.get::<CustomerTable>() {
            return Ok(table.clone());
        }

        let table =
            authenticate_customer(&state.access_codes, &parts.headers, parts.uri.path()).await?;
        parts.extensions.insert(table.clone());
        Ok(table)
    }
}
