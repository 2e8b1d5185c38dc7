//! Background worker applying queued click increments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;

/// Retries after the first failed increment.
const MAX_RETRIES: usize = 3;

/// Consumes click events until every sender is dropped.
///
/// Up to `concurrency` increments run at once. Each failed increment is retried
/// with exponential backoff; a click that still fails is logged and dropped.
/// When the channel closes the worker waits for in-flight increments before
/// returning, so awaiting it after shutdown guarantees every queued click was applied.
pub async fn run_click_worker<R>(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<R>,
    concurrency: usize,
) where
    R: UrlRepository + ?Sized + 'static,
{
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let repository = repository.clone();

        tokio::spawn(async move {
            record_click(repository, event).await;
            drop(permit);
        });
    }

    if let Ok(_all) = semaphore.acquire_many(concurrency as u32).await {
        info!("Click worker drained, shutting down");
    }
}

async fn record_click<R>(repository: Arc<R>, event: ClickEvent)
where
    R: UrlRepository + ?Sized + 'static,
{
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(MAX_RETRIES);

    let result = Retry::start(strategy, || {
        let repository = repository.clone();
        let code = event.code.clone();
        async move { repository.increment_clicks(&code).await }
    })
    .await;

    match result {
        Ok(true) => debug!(code = %event.code, "Click recorded"),
        Ok(false) => warn!(code = %event.code, "Click for unknown code ignored"),
        Err(e) => error!(code = %event.code, error = %e, "Failed to record click"),
    }
}
