//! Table service
//!
//! CRUD on dining tables plus the assign/release protocol. Every status
//! change is a single conditional UPDATE in the repository; when it matches
//! nothing the table is re-read to tell "missing" from "wrong state".

use shared::util::now_millis;
use shared::DiningTable;
use uuid::Uuid;

use super::state::{Transition, ensure_deletable};
use crate::auth::AccessCodeGenerator;
use crate::db::repository::{DiningTableRepository, RepoError};
use crate::utils::{AppError, AppResult};

/// Fresh codes tried before giving up on an assign; a clash needs two equal
/// 128-bit codes
const MAX_CODE_ATTEMPTS: usize = 3;

const TABLE: &str = "Table";

#[derive(Clone, Debug)]
pub struct TableService {
    repo: DiningTableRepository,
    codes: AccessCodeGenerator,
}

impl TableService {
    pub fn new(repo: DiningTableRepository, codes: AccessCodeGenerator) -> Self {
        Self { repo, codes }
    }

    pub async fn find_all(&self) -> AppResult<Vec<DiningTable>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<DiningTable> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(TABLE))
    }

    /// New tables start Free
    pub async fn add(&self, name: &str, capacity: i32) -> AppResult<DiningTable> {
        if self.repo.find_by_name(name).await?.is_some() {
            return Err(AppError::DuplicateName);
        }

        let table = self
            .repo
            .create(name, capacity, now_millis())
            .await
            .map_err(duplicate_name)?;

        tracing::info!(table_id = %table.id, name = %table.name, "Table created");
        Ok(table)
    }

    /// Rename and/or resize; all-or-nothing
    pub async fn edit(
        &self,
        id: Uuid,
        name: Option<&str>,
        capacity: Option<i32>,
    ) -> AppResult<DiningTable> {
        if let Some(name) = name {
            let clash = self.repo.find_by_name(name).await?;
            if clash.is_some_and(|other| other.id != id) {
                return Err(AppError::DuplicateName);
            }
        }

        let table = self
            .repo
            .update(id, name, capacity, now_millis())
            .await
            .map_err(duplicate_name)?
            .ok_or_else(|| AppError::not_found(TABLE))?;

        tracing::info!(table_id = %table.id, "Table edited");
        Ok(table)
    }

    /// Only Free tables can be deleted
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        // A concurrent release can turn an Occupied miss into a Free table,
        // so one more attempt is made in that case
        for _ in 0..2 {
            if self.repo.delete_free(id).await? {
                tracing::info!(table_id = %id, "Table deleted");
                return Ok(());
            }

            let table = self.find_by_id(id).await?;
            ensure_deletable(table.status)?;
        }
        Err(self.delete_miss(id).await)
    }

    /// Why a delete kept missing after its retry
    async fn delete_miss(&self, id: Uuid) -> AppError {
        match self.repo.find_by_id(id).await {
            Ok(None) => AppError::not_found(TABLE),
            Ok(Some(table)) => match ensure_deletable(table.status) {
                Err(rejected) => rejected.into(),
                Ok(()) => AppError::internal("Table status kept changing during delete"),
            },
            Err(e) => e.into(),
        }
    }

    /// Free → Occupied with a freshly minted access code
    ///
    /// Never overwrites the code of an already occupied table.
    pub async fn assign(&self, id: Uuid) -> AppResult<DiningTable> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = self.codes.generate()?;

            match self.repo.assign(id, &code, now_millis()).await {
                Ok(Some(table)) => {
                    tracing::info!(table_id = %table.id, name = %table.name, "Table assigned");
                    return Ok(table);
                }
                Ok(None) => return Err(self.transition_miss(id, Transition::Assign).await),
                Err(RepoError::Duplicate(_)) => {
                    tracing::warn!(table_id = %id, attempt, "Access code collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(AppError::internal("Failed to mint a unique access code"))
    }

    /// Occupied → Free, invalidating the access code
    pub async fn release(&self, id: Uuid) -> AppResult<DiningTable> {
        match self.repo.release(id, now_millis()).await? {
            Some(table) => {
                tracing::info!(table_id = %table.id, name = %table.name, "Table released");
                Ok(table)
            }
            None => Err(self.transition_miss(id, Transition::Release).await),
        }
    }

    /// Why a conditional transition matched no row
    async fn transition_miss(&self, id: Uuid, transition: Transition) -> AppError {
        match self.repo.find_by_id(id).await {
            Ok(None) => AppError::not_found(TABLE),
            Ok(Some(table)) => match transition.apply(table.status) {
                Err(rejected) => rejected.into(),
                // Status flipped back between the UPDATE and this read
                Ok(_) => transition.rejection().into(),
            },
            Err(e) => e.into(),
        }
    }
}

/// UNIQUE(name) lost a race with another writer
fn duplicate_name(e: RepoError) -> AppError {
    match e {
        RepoError::Duplicate(_) => AppError::DuplicateName,
        other => other.into(),
    }
}
