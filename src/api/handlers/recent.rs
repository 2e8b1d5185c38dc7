//! Handler for the recently created URLs listing.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::recent::RecentQuery;
use crate::api::dto::url_record::UrlRecordResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the most recently created short URLs, newest first.
///
/// # Endpoint
///
/// `GET /api/recent`
///
/// # Query Parameters
///
/// - `limit` (optional): number of records (default: 5, max: 100)
pub async fn recent_handler(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<UrlRecordResponse>>, AppError> {
    let records = state
        .shortener
        .list_recent(query.effective_limit())
        .await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}
