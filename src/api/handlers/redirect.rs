//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_reserved_code;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Responds with `301 Moved Permanently`. The click is counted in the background
/// and never delays the response.
///
/// # Errors
///
/// Returns 404 Not Found for reserved paths and unknown codes.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if is_reserved_code(&code) {
        return Err(AppError::not_found("Not found", json!({ "path": code })));
    }

    let original_url = state.shortener.redirect(&code).await?;

    let location = HeaderValue::from_bytes(original_url.as_bytes()).map_err(|e| {
        AppError::store(
            "Stored URL is not a valid redirect target",
            json!({ "code": code, "reason": e.to_string() }),
        )
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
