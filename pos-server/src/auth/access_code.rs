//! Customer access codes
//!
//! A code is minted when a table is assigned and is the whole customer
//! session: whoever presents it in the `AccessCode` header is bound to that
//! table until it is released (or the code ages past the configured TTL).

use std::time::Duration;

use ring::rand::{SecureRandom, SystemRandom};
use shared::DiningTable;

use crate::db::repository::DiningTableRepository;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Header carrying the customer access code
pub const ACCESS_CODE_HEADER: &str = "accesscode";

/// Random bytes per code (128 bits)
const CODE_BYTES: usize = 16;

/// Mints unguessable access codes
#[derive(Clone)]
pub struct AccessCodeGenerator {
    rng: SystemRandom,
}

impl std::fmt::Debug for AccessCodeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessCodeGenerator")
    }
}

impl Default for AccessCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessCodeGenerator {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    /// 32 lowercase hex characters
    pub fn generate(&self) -> AppResult<String> {
        let mut bytes = [0u8; CODE_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AppError::internal("Failed to generate access code"))?;
        Ok(hex::encode(bytes))
    }
}

/// Cheap shape check so garbage never reaches the store
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_BYTES * 2 && code.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Table resolved from a valid access code
///
/// Inserted into request extensions by the customer middleware; handlers
/// only ever see this table.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerTable(pub DiningTable);

impl CustomerTable {
    pub fn into_inner(self) -> DiningTable {
        self.0
    }
}

/// Resolves a presented code to its occupied table
#[derive(Clone, Debug)]
pub struct AccessCodeVerifier {
    repo: DiningTableRepository,
    ttl: Option<Duration>,
}

impl AccessCodeVerifier {
    /// `ttl = None` keeps codes valid for the whole occupancy
    pub fn new(repo: DiningTableRepository, ttl: Option<Duration>) -> Self {
        Self { repo, ttl }
    }

    /// Unknown, released and expired codes all fail the same way
    pub async fn verify(&self, code: &str, now_millis: i64) -> AppResult<CustomerTable> {
        let code = code.trim();
        if !is_well_formed(code) {
            security_log!("WARN", "access_code_malformed", length = code.len());
            return Err(AppError::Unauthenticated);
        }

        let Some(table) = self.repo.find_by_access_code(code).await? else {
            security_log!("WARN", "access_code_unknown", length = code.len());
            return Err(AppError::Unauthenticated);
        };

        if !table.status.is_occupied() {
            return Err(AppError::Unauthenticated);
        }

        if self.is_expired(&table, now_millis) {
            security_log!(
                "WARN",
                "access_code_expired",
                table_id = table.id.to_string()
            );
            return Err(AppError::Unauthenticated);
        }

        Ok(CustomerTable(table))
    }

    fn is_expired(&self, table: &DiningTable, now_millis: i64) -> bool {
        let (Some(ttl), Some(assigned_at)) = (self.ttl, table.assigned_at) else {
            return false;
        };
        let ttl_millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        now_millis.saturating_sub(assigned_at) > ttl_millis
    }
}
