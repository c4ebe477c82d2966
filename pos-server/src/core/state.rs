use std::sync::Arc;

use crate::auth::{AccessCodeGenerator, AccessCodeVerifier, JwtService, RoleGate};
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::repository::{DiningTableRepository, UserRepository};
use crate::tables::TableService;
use crate::users::UserService;

/// Shared server state, cloned into every handler
///
/// Everything here is built once from [`Config`] at startup.
///
/// ```ignore
/// let state = ServerState::initialize(&config).await?;
/// let table = state.tables.assign(table_id).await?;
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    /// Staff bearer tokens
    pub jwt_service: Arc<JwtService>,
    /// Customer access codes
    pub access_codes: AccessCodeVerifier,
    /// Roles admitted to /manage
    pub manage_gate: RoleGate,
    pub tables: TableService,
    pub users: UserService,
}

impl ServerState {
    /// Open the configured database and build every service on top of it
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_url, config.db_acquire_timeout())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        Ok(Self::with_db(config.clone(), db))
    }

    /// Build the state over an already opened database
    pub fn with_db(config: Config, db: DbService) -> Self {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        let table_repo = DiningTableRepository::new(db.pool.clone());

        let access_codes = AccessCodeVerifier::new(table_repo.clone(), config.access_code_ttl());
        let manage_gate = RoleGate::new(config.manage_roles.iter().copied());
        let tables = TableService::new(table_repo, AccessCodeGenerator::new());
        let users = UserService::new(UserRepository::new(db.pool.clone()), jwt_service.clone());

        Self {
            config: Arc::new(config),
            db,
            jwt_service,
            access_codes,
            manage_gate,
            tables,
            users,
        }
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
