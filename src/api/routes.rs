//! JSON API route configuration.

use crate::api::handlers::{recent_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create or reuse a short URL
/// - `GET  /recent`        - Most recently created short URLs
/// - `GET  /stats/{code}`  - Record and click count for one code
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/recent", get(recent_handler))
        .route("/stats/{code}", get(stats_handler))
}
