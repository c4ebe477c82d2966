use axum::Json;
use shared::DiningTable;

use crate::auth::CustomerTable;
use crate::utils::AppResult;

/// GET /customer/tables - the caller's bound table
pub async fn current_table(CustomerTable(table): CustomerTable) -> AppResult<Json<DiningTable>> {
    Ok(Json(table))
}
