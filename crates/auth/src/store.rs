use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::Account;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Uniqueness violation detected at the storage layer. Surfaced instead
    /// of silently overwriting when two writers race on the same email.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store could not be reached; callers may retry.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence seam for accounts. Email equality is case-sensitive against
/// the stored value.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn exists_by_email(&self, email: &str) -> StoreResult<bool>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Account>>;

    /// Persist an account, assigning an id if it is new. The uniqueness
    /// check and the insert must be a single atomic unit: a concurrent
    /// registration with the same email fails with `Conflict` rather than
    /// duplicating or overwriting.
    async fn save(&self, account: Account) -> StoreResult<Account>;
}

#[derive(Default)]
struct Tables {
    by_id: HashMap<Uuid, Account>,
    id_by_email: HashMap<String, Uuid>,
}

/// In-memory account store. Both indexes are updated under one write lock,
/// which makes check-and-insert atomic with respect to the email
/// uniqueness invariant.
#[derive(Default)]
pub struct MemoryAccountStore {
    tables: RwLock<Tables>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.id_by_email.contains_key(email))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let tables = self.tables.read().await;
        Ok(tables
            .id_by_email
            .get(email)
            .and_then(|id| tables.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Account>> {
        let tables = self.tables.read().await;
        Ok(tables.by_id.get(&id).cloned())
    }

    async fn save(&self, mut account: Account) -> StoreResult<Account> {
        let mut tables = self.tables.write().await;

        let id = account.id.unwrap_or_else(Uuid::new_v4);
        if let Some(existing) = tables.id_by_email.get(&account.email) {
            if *existing != id {
                return Err(StoreError::Conflict(format!(
                    "email already registered: {}",
                    account.email
                )));
            }
        }

        account.id = Some(id);
        tables.id_by_email.insert(account.email.clone(), id);
        tables.by_id.insert(id, account.clone());

        Ok(account)
    }
}
