/*
 * Responsibility
 * - accounts data access seam (AccountStore)
 * - in-memory implementation; `owner` is fixed at creation and never reassigned
 */
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::repos::error::RepoError;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Cad,
}

impl Currency {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USD" => Some(Self::Usd),
            "EUR" => Some(Self::Eur),
            "CAD" => Some(Self::Cad),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

/// Account persistence as seen by the handlers.
///
/// Implementations must be safe to share across requests.
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug {
    async fn create(&self, owner: &str, currency: Currency) -> RepoResult<AccountRow>;

    async fn get(&self, id: i64) -> RepoResult<Option<AccountRow>>;

    /// Accounts of `owner` ordered by id.
    async fn list_by_owner(
        &self,
        owner: &str,
        limit: usize,
        offset: usize,
    ) -> RepoResult<Vec<AccountRow>>;

    /// Returns false when nothing was deleted.
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, AccountRow>,
}

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    inner: RwLock<Inner>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, owner: &str, currency: Currency) -> RepoResult<AccountRow> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;

        let row = AccountRow {
            id: inner.next_id,
            owner: owner.to_string(),
            balance: 0,
            currency,
            created_at: Utc::now(),
        };
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get(&self, id: i64) -> RepoResult<Option<AccountRow>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner: &str,
        limit: usize,
        offset: usize,
    ) -> RepoResult<Vec<AccountRow>> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .filter(|row| row.owner == owner)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_increasing_ids_and_zero_balance() {
        let store = InMemoryAccountStore::new();
        let a = store.create("alice", Currency::Usd).await.unwrap();
        let b = store.create("bob", Currency::Eur).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.balance, 0);
        assert_eq!(a.owner, "alice");
        assert_eq!(store.get(2).await.unwrap(), Some(b));
        assert_eq!(store.get(3).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_filters_by_owner_and_pages() {
        let store = InMemoryAccountStore::new();
        for _ in 0..3 {
            store.create("alice", Currency::Usd).await.unwrap();
            store.create("bob", Currency::Cad).await.unwrap();
        }

        let first = store.list_by_owner("alice", 2, 0).await.unwrap();
        let second = store.list_by_owner("alice", 2, 2).await.unwrap();

        assert_eq!(first.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(second.iter().map(|r| r.id).collect::<Vec<_>>(), vec![5]);
        assert!(first.iter().chain(&second).all(|r| r.owner == "alice"));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let store = InMemoryAccountStore::new();
        let row = store.create("alice", Currency::Usd).await.unwrap();

        assert!(store.delete(row.id).await.unwrap());
        assert!(!store.delete(row.id).await.unwrap());
        assert_eq!(store.get(row.id).await.unwrap(), None);
    }

    #[test]
    fn currency_parse() {
        assert_eq!(Currency::parse("USD"), Some(Currency::Usd));
        assert_eq!(Currency::parse("usd"), None);
        assert_eq!(Currency::parse("JPY"), None);
    }
}
