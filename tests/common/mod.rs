#![allow(dead_code)]

use link_shortener::application::services::ShortenerService;
use link_shortener::domain::click_event::ClickEvent;
use link_shortener::domain::repositories::UrlRepository;
use link_shortener::infrastructure::cache::NullCache;
use link_shortener::infrastructure::persistence::InMemoryUrlRepository;
use link_shortener::state::AppState;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<InMemoryUrlRepository>,
    pub click_rx: mpsc::Receiver<ClickEvent>,
}

pub fn create_test_state() -> TestContext {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let (tx, rx) = mpsc::channel(100);

    let dyn_repository: Arc<dyn UrlRepository> = repository.clone();
    let shortener = ShortenerService::new(dyn_repository, Arc::new(NullCache::new()), tx);

    TestContext {
        state: AppState::new(Arc::new(shortener)),
        repository,
        click_rx: rx,
    }
}

/// Applies every queued click directly, standing in for the background worker.
pub async fn drain_clicks(rx: &mut mpsc::Receiver<ClickEvent>, repository: &InMemoryUrlRepository) {
    while let Ok(event) = rx.try_recv() {
        repository.increment_clicks(&event.code).await.unwrap();
    }
}

pub async fn seed_url(repository: &InMemoryUrlRepository, code: &str, url: &str) {
    use link_shortener::domain::entities::NewUrlRecord;

    repository
        .insert(NewUrlRecord::now(code.to_string(), url.to_string()))
        .await
        .unwrap();
}
