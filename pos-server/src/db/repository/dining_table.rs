//! Dining Table Repository

use shared::{DiningTable, TableStatus};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult};
use crate::tables::state::Transition;

const COLUMNS: &str = "id, name, capacity, status, access_code, assigned_at, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct DiningTableRow {
    id: String,
    name: String,
    capacity: i32,
    status: String,
    access_code: Option<String>,
    assigned_at: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<DiningTableRow> for DiningTable {
    type Error = RepoError;

    fn try_from(row: DiningTableRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|_| RepoError::Database(format!("Corrupt table id: {}", row.id)))?;
        let status = TableStatus::from_db(&row.status)
            .ok_or_else(|| RepoError::Database(format!("Corrupt table status: {}", row.status)))?;
        Ok(DiningTable {
            id,
            name: row.name,
            capacity: row.capacity,
            status,
            access_code: row.access_code,
            assigned_at: row.assigned_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn convert(row: Option<DiningTableRow>) -> RepoResult<Option<DiningTable>> {
    row.map(DiningTable::try_from).transpose()
}

#[derive(Clone, Debug)]
pub struct DiningTableRepository {
    pool: SqlitePool,
}

impl DiningTableRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All tables ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let rows: Vec<DiningTableRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM dining_table ORDER BY name"))
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(DiningTable::try_from).collect()
    }

    pub async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<DiningTable>> {
        let row = sqlx::query_as(&format!("SELECT {COLUMNS} FROM dining_table WHERE id = ?1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        convert(row)
    }

    /// Exact, case-sensitive name match
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<DiningTable>> {
        let row = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM dining_table WHERE name = ?1 LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        convert(row)
    }

    /// Occupied table currently holding `code`
    pub async fn find_by_access_code(&self, code: &str) -> RepoResult<Option<DiningTable>> {
        let row = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM dining_table WHERE access_code = ?1 AND status = ?2"
        ))
        .bind(code)
        .bind(TableStatus::Occupied.as_db())
        .fetch_optional(&self.pool)
        .await?;
        convert(row)
    }

    /// Insert a new Free table
    ///
    /// A name clash surfaces as [`RepoError::Duplicate`] from the UNIQUE index.
    pub async fn create(&self, name: &str, capacity: i32, now: i64) -> RepoResult<DiningTable> {
        let row: DiningTableRow = sqlx::query_as(&format!(
            "INSERT INTO dining_table (id, name, capacity, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5) RETURNING {COLUMNS}"
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(capacity)
        .bind(TableStatus::Free.as_db())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        DiningTable::try_from(row)
    }

    /// Update name and/or capacity in one statement; `None` keeps the value
    ///
    /// Returns `None` when the id does not exist. Status and access code are
    /// never touched here.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        capacity: Option<i32>,
        now: i64,
    ) -> RepoResult<Option<DiningTable>> {
        let row = sqlx::query_as(&format!(
            "UPDATE dining_table SET \
                name = COALESCE(?1, name), \
                capacity = COALESCE(?2, capacity), \
                updated_at = ?3 \
             WHERE id = ?4 RETURNING {COLUMNS}"
        ))
        .bind(name)
        .bind(capacity)
        .bind(now)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        convert(row)
    }

    /// Delete the table only if it is Free
    ///
    /// Returns `false` when no row matched (missing or occupied).
    pub async fn delete_free(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM dining_table WHERE id = ?1 AND status = ?2")
            .bind(id.to_string())
            .bind(TableStatus::Free.as_db())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Free → Occupied with `code`, only if the table is currently Free
    ///
    /// Returns `None` when the guard did not match (missing or already occupied).
    pub async fn assign(&self, id: Uuid, code: &str, now: i64) -> RepoResult<Option<DiningTable>> {
        self.transition(id, Transition::Assign, Some(code), now).await
    }

    /// Occupied → Free, clearing the code, only if the table is currently Occupied
    pub async fn release(&self, id: Uuid, now: i64) -> RepoResult<Option<DiningTable>> {
        self.transition(id, Transition::Release, None, now).await
    }

    /// Compare-and-set on `status`
    async fn transition(
        &self,
        id: Uuid,
        transition: Transition,
        code: Option<&str>,
        now: i64,
    ) -> RepoResult<Option<DiningTable>> {
        debug_assert_eq!(transition.issues_code(), code.is_some());
        let assigned_at = code.map(|_| now);

        let row = sqlx::query_as(&format!(
            "UPDATE dining_table SET \
                status = ?1, access_code = ?2, assigned_at = ?3, updated_at = ?4 \
             WHERE id = ?5 AND status = ?6 RETURNING {COLUMNS}"
        ))
        .bind(transition.target().as_db())
        .bind(code)
        .bind(assigned_at)
        .bind(now)
        .bind(id.to_string())
        .bind(transition.source().as_db())
        .fetch_optional(&self.pool)
        .await?;
        convert(row)
    }
}
