//! Auth API Handlers

use axum::{Json, extract::State};
use shared::request::{CreateStaffRequest, LoginRequest, RegisterRequest};
use shared::response::LoginResponse;
use shared::{Role, UserDetail};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResult, ValidatedJson};

/// POST /auth/register
///
/// Self-registration always creates an employee.
pub async fn register(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<UserDetail>> {
    let user = state
        .users
        .register(&req.name, &req.email, &req.password, Role::Employee)
        .await?;
    Ok(Json(user))
}

/// POST /auth/login
pub async fn login(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    Ok(Json(state.users.login(&req.email, &req.password).await?))
}

/// POST /manage/staff
pub async fn create_staff(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(req): ValidatedJson<CreateStaffRequest>,
) -> AppResult<Json<UserDetail>> {
    let user = state
        .users
        .register(&req.name, &req.email, &req.password, req.role)
        .await?;
    tracing::info!(created_by = %current_user.id, user_id = %user.id, role = %user.role, "Staff account created");
    Ok(Json(user))
}
