//! Repository trait for URL record storage.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for URL records.
///
/// Implementations own every atomicity guarantee the service relies on:
/// unique `short_code` and `original_url`, and an atomic click increment.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds a record by its exact original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Inserts a new record with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateKey`] if the short code or the original URL
    /// already exists, even when a concurrent insert won the race.
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn insert(&self, record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Atomically adds one to the record's click counter.
    ///
    /// Returns `Ok(false)` if no record matches `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError>;

    /// Returns up to `limit` records, newest first.
    ///
    /// Records with equal `created_at` are ordered by insertion sequence,
    /// most recently inserted first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn list_recent(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> Result<(), AppError>;
}
