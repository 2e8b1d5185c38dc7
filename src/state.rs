//! Shared state injected into every HTTP handler.

use std::sync::Arc;

use crate::application::services::ShortenerService;
use crate::domain::repositories::UrlRepository;

/// Shortener service over whichever repository the server was configured with.
pub type DynShortenerService = ShortenerService<dyn UrlRepository>;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<DynShortenerService>,
}

impl AppState {
    pub fn new(shortener: Arc<DynShortenerService>) -> Self {
        Self { shortener }
    }
}
