//! Handler for the shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL, or returns the existing one for an already-seen URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortCode": "aB3xY9",
///   "originalUrl": "https://example.com/a",
///   "createdAt": "2025-01-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not a JSON object with a string `url`,
/// or if `url` is missing or not an absolute URL.
/// Returns 500 Internal Server Error if no free code was found or the store failed.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::invalid_url(
            "Request body must be a JSON object with a string `url`",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;

    let url = payload.url.unwrap_or_default();
    let record = state.shortener.create_or_reuse(&url).await?;

    Ok(Json(record.into()))
}
