//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::DiningTable;
use shared::request::{AddTableRequest, AssignTableRequest, EditTableRequest, ReleaseTableRequest};
use shared::response::MessageResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResult, ValidatedJson, message, parse_uuid};

/// GET /manage/tables
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    Ok(Json(state.tables.find_all().await?))
}

/// GET /manage/tables/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let id = parse_uuid(&id)?;
    Ok(Json(state.tables.find_by_id(id).await?))
}

/// POST /manage/tables
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<AddTableRequest>,
) -> AppResult<Json<MessageResponse>> {
    let table = state.tables.add(&payload.name, payload.capacity).await?;
    tracing::debug!(table_id = %table.id, user_id = %user.id, "create table");
    Ok(message("Table added successfully"))
}

/// PUT /manage/tables
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<EditTableRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .tables
        .edit(payload.id, payload.name.as_deref(), payload.capacity)
        .await?;
    tracing::debug!(table_id = %payload.id, user_id = %user.id, "edit table");
    Ok(message("Table edited successfully"))
}

/// DELETE /manage/tables/{id}
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_uuid(&id)?;
    state.tables.delete(id).await?;
    tracing::debug!(table_id = %id, user_id = %user.id, "delete table");
    Ok(message("Table deleted successfully"))
}

/// POST /manage/tables/assign
///
/// Answers the occupied table, access code included, so staff can hand the
/// code to the guests.
pub async fn assign(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<AssignTableRequest>,
) -> AppResult<Json<DiningTable>> {
    let table = state.tables.assign(payload.table_id).await?;
    tracing::debug!(table_id = %table.id, user_id = %user.id, "assign table");
    Ok(Json(table))
}

/// POST /manage/tables/release
pub async fn release(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<ReleaseTableRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.tables.release(payload.table_id).await?;
    tracing::debug!(table_id = %payload.table_id, user_id = %user.id, "release table");
    Ok(message("Table released successfully"))
}
