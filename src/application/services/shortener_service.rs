//! Short code allocation, redirect and statistics service.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_absolute_url;

/// Consecutive code collisions tolerated before giving up.
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: usize = 10;

/// Number of records returned by [`ShortenerService::list_recent`] when the caller has no preference.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Service implementing create-or-reuse, redirect, stats and recent listing.
///
/// Holds no mutable state of its own: uniqueness and counter atomicity are
/// delegated to the repository, so one instance is shared by every request.
pub struct ShortenerService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    click_sender: mpsc::Sender<ClickEvent>,
    max_generation_attempts: usize,
}

impl<R: UrlRepository + ?Sized> ShortenerService<R> {
    /// Creates a new shortener service.
    ///
    /// Redirects queue a [`ClickEvent`] on `click_sender`; the matching receiver
    /// should be driven by [`crate::domain::click_worker::run_click_worker`].
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        click_sender: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            repository,
            cache,
            click_sender,
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
        }
    }

    /// Overrides the collision retry cap. Values below 1 are raised to 1.
    pub fn with_max_generation_attempts(mut self, attempts: usize) -> Self {
        self.max_generation_attempts = attempts.max(1);
        self
    }

    /// Returns the record for `url`, creating it on first submission.
    ///
    /// # Reuse
    ///
    /// A URL that was already shortened returns the stored record unchanged, so
    /// repeated submissions are idempotent.
    ///
    /// # Insert races
    ///
    /// If a concurrent request inserts the same URL between the reuse check and
    /// the insert, the store rejects the loser with a duplicate key. The loser then
    /// re-reads by URL and returns the winner's record. A duplicate that cannot be
    /// resolved that way (a code collision race) is reported as [`AppError::Store`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if `url` is not an absolute URL with a host.
    ///
    /// Returns [`AppError::GenerationExhausted`] after too many code collisions.
    ///
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn create_or_reuse(&self, url: &str) -> Result<UrlRecord, AppError> {
        validate_absolute_url(url).map_err(|e| {
            AppError::invalid_url(
                "Invalid URL format",
                json!({ "url": url, "reason": e.to_string() }),
            )
        })?;

        if let Some(existing) = self.repository.find_by_url(url).await? {
            debug!(code = %existing.short_code, "Reusing existing short code");
            return Ok(existing);
        }

        let code = self.generate_unique_code().await?;

        match self
            .repository
            .insert(NewUrlRecord::now(code, url.to_string()))
            .await
        {
            Ok(record) => {
                info!(code = %record.short_code, url = %record.original_url, "Short URL created");
                Ok(record)
            }
            Err(AppError::DuplicateKey { details, .. }) => {
                match self.repository.find_by_url(url).await? {
                    Some(winner) => {
                        debug!(code = %winner.short_code, "Lost insert race, returning winner");
                        Ok(winner)
                    }
                    None => Err(AppError::store(
                        "Short code was claimed concurrently",
                        json!({ "url": url, "conflict": details }),
                    )),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Resolves `code` to its original URL and queues a click.
    ///
    /// The click is counted asynchronously and never fails the redirect. A full
    /// click queue defers the click rather than dropping it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `code`.
    ///
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn redirect(&self, code: &str) -> Result<String, AppError> {
        let original_url = match self.cache.get_url(code).await {
            Ok(Some(url)) => url,
            Ok(None) => self.resolve_and_cache(code).await?,
            Err(e) => {
                warn!("Cache error: {}", e);
                self.find_existing(code).await?.original_url
            }
        };

        self.queue_click(code);

        Ok(original_url)
    }

    /// Returns the full record for `code`, including its current click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `code`.
    ///
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn get_stats(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.find_existing(code).await
    }

    /// Returns at most `limit` records, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<UrlRecord>, AppError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.repository.list_recent(limit).await
    }

    /// Checks that the store is reachable.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.repository.health_check().await
    }

    /// Checks that the redirect cache is reachable.
    pub async fn check_cache(&self) -> bool {
        self.cache.health_check().await
    }

    /// Returns `Some(free slots)` while the click queue is open, `None` once it closed.
    pub fn click_queue_capacity(&self) -> Option<usize> {
        if self.click_sender.is_closed() {
            None
        } else {
            Some(self.click_sender.capacity())
        }
    }

    async fn find_existing(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code })))
    }

    async fn resolve_and_cache(&self, code: &str) -> Result<String, AppError> {
        let record = self.find_existing(code).await?;

        let cache = self.cache.clone();
        let key = record.short_code.clone();
        let url = record.original_url.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.set_url(&key, &url, None).await {
                warn!("Failed to cache URL: {}", e);
            }
        });

        Ok(record.original_url)
    }

    /// Queues a click without delaying the caller.
    ///
    /// A full queue hands the event to a task that waits for space, so bursts
    /// larger than the queue are still counted. Clicks are only lost once the
    /// queue is closed, which happens after shutdown.
    fn queue_click(&self, code: &str) {
        match self.click_sender.try_send(ClickEvent::new(code)) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                debug!(code = %event.code, "Click queue full, deferring click");
                let sender = self.click_sender.clone();
                tokio::spawn(async move {
                    if let Err(e) = sender.send(event).await {
                        warn!(code = %e.0.code, "Click queue closed, click dropped");
                    }
                });
            }
            Err(TrySendError::Closed(event)) => {
                warn!(code = %event.code, "Click queue closed, click dropped");
            }
        }
    }

    /// Draws candidate codes until one is unused.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for _ in 0..self.max_generation_attempts {
            let code = generate_code();

            if self.repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }

            debug!(code = %code, "Short code collision, retrying");
        }

        Err(AppError::generation_exhausted(
            "Unable to generate unique short code",
            json!({ "attempts": self.max_generation_attempts }),
        ))
    }
}
