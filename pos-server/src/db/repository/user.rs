//! Staff User Repository

use shared::{Role, UserDetail};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult};

/// Stored staff account, including the password hash
#[derive(Debug, Clone)]
pub struct StaffUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: i64,
}

impl From<StaffUser> for UserDetail {
    fn from(user: StaffUser) -> Self {
        UserDetail {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StaffUserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: i64,
}

impl TryFrom<StaffUserRow> for StaffUser {
    type Error = RepoError;

    fn try_from(row: StaffUserRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|_| RepoError::Database(format!("Corrupt user id: {}", row.id)))?;
        let role = row
            .role
            .parse()
            .map_err(|e| RepoError::Database(format!("Corrupt user role: {e}")))?;
        Ok(StaffUser {
            id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Emails are stored lowercased; callers normalize before lookup
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<StaffUser>> {
        let row: Option<StaffUserRow> = sqlx::query_as(
            "SELECT id, name, email, password_hash, role, created_at FROM staff_user WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(StaffUser::try_from).transpose()
    }

    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        now: i64,
    ) -> RepoResult<StaffUser> {
        let row: StaffUserRow = sqlx::query_as(
            "INSERT INTO staff_user (id, name, email, password_hash, role, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             RETURNING id, name, email, password_hash, role, created_at",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        StaffUser::try_from(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_create_and_find() {
        let db = DbService::in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool);

        let created = repo
            .create("Ann", "ann@example.com", "hash", Role::Manager, 1000)
            .await
            .unwrap();
        let found = repo.find_by_email("ann@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.role, Role::Manager);
        assert!(repo.find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_unique() {
        let db = DbService::in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool);

        repo.create("Ann", "ann@example.com", "hash", Role::Employee, 1000)
            .await
            .unwrap();
        let err = repo
            .create("Ann 2", "ann@example.com", "hash", Role::Employee, 2000)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }
}
