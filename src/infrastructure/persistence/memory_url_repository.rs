//! In-process implementation of the URL repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// URL repository kept entirely in memory.
///
/// Every operation takes a single lock, which gives the same guarantees the
/// PostgreSQL constraints do: one winner per duplicate insert and no lost
/// click increments. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Records in insertion order; `id` is the position plus one.
    records: Vec<UrlRecord>,
    by_code: HashMap<String, usize>,
    by_url: HashMap<String, usize>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.read().map(|inner| inner.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, AppError> {
        self.inner
            .read()
            .map_err(|_| AppError::store("In-memory store lock poisoned", json!({})))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, AppError> {
        self.inner
            .write()
            .map_err(|_| AppError::store("In-memory store lock poisoned", json!({})))
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>, AppError> {
        let inner = self.read()?;
        Ok(inner.by_url.get(url).map(|&i| inner.records[i].clone()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let inner = self.read()?;
        Ok(inner.by_code.get(code).map(|&i| inner.records[i].clone()))
    }

    async fn insert(&self, record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let mut inner = self.write()?;

        if inner.by_code.contains_key(&record.short_code) {
            return Err(AppError::duplicate_key(
                "Unique constraint violation",
                json!({ "constraint": "urls_short_code_key", "field": "short_code" }),
            ));
        }
        if inner.by_url.contains_key(&record.original_url) {
            return Err(AppError::duplicate_key(
                "Unique constraint violation",
                json!({ "constraint": "urls_url_hash_key", "field": "original_url" }),
            ));
        }

        let index = inner.records.len();
        let stored = UrlRecord::new(
            index as i64 + 1,
            record.short_code,
            record.original_url,
            record.created_at,
            0,
        );

        inner.by_code.insert(stored.short_code.clone(), index);
        inner.by_url.insert(stored.original_url.clone(), index);
        inner.records.push(stored.clone());

        Ok(stored)
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        let mut inner = self.write()?;

        let Some(&index) = inner.by_code.get(code) else {
            return Ok(false);
        };
        inner.records[index].clicks += 1;

        Ok(true)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        let inner = self.read()?;
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);

        let mut records: Vec<&UrlRecord> = inner.records.iter().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(records.into_iter().take(limit).cloned().collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn new_record(code: &str, url: &str) -> NewUrlRecord {
        NewUrlRecord::now(code.to_string(), url.to_string())
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryUrlRepository::new();

        let stored = repo
            .insert(new_record("abc123", "https://example.com"))
            .await
            .unwrap();
        assert_eq!(stored.id, 1);
        assert_eq!(stored.clicks, 0);

        let by_code = repo.find_by_code("abc123").await.unwrap().unwrap();
        let by_url = repo
            .find_by_url("https://example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_code, stored);
        assert_eq!(by_url, stored);
        assert!(repo.find_by_code("zzz999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_code() {
        let repo = InMemoryUrlRepository::new();
        repo.insert(new_record("abc123", "https://a.com"))
            .await
            .unwrap();

        let result = repo.insert(new_record("abc123", "https://b.com")).await;

        assert!(matches!(result, Err(AppError::DuplicateKey { .. })));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_url() {
        let repo = InMemoryUrlRepository::new();
        repo.insert(new_record("abc123", "https://a.com"))
            .await
            .unwrap();

        let result = repo.insert(new_record("def456", "https://a.com")).await;

        assert!(matches!(result, Err(AppError::DuplicateKey { .. })));
    }

    #[tokio::test]
    async fn test_increment_unknown_code_is_noop() {
        let repo = InMemoryUrlRepository::new();
        assert!(!repo.increment_clicks("nope00").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        repo.insert(new_record("hot001", "https://hot.com"))
            .await
            .unwrap();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_clicks("hot001").await.unwrap() })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        let record = repo.find_by_code("hot001").await.unwrap().unwrap();
        assert_eq!(record.clicks, 50);
    }

    #[tokio::test]
    async fn test_list_recent_orders_by_created_at_then_insertion() {
        let repo = InMemoryUrlRepository::new();
        let now = Utc::now();

        let mut older = new_record("old001", "https://old.com");
        older.created_at = now - Duration::seconds(10);
        let mut tie_a = new_record("tie00a", "https://a.com");
        tie_a.created_at = now;
        let mut tie_b = new_record("tie00b", "https://b.com");
        tie_b.created_at = now;

        repo.insert(tie_a).await.unwrap();
        repo.insert(older).await.unwrap();
        repo.insert(tie_b).await.unwrap();

        let codes: Vec<String> = repo
            .list_recent(10)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.short_code)
            .collect();

        assert_eq!(codes, vec!["tie00b", "tie00a", "old001"]);
        assert_eq!(repo.list_recent(1).await.unwrap().len(), 1);
    }
}
