//! URL record entity representing a short code mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its click counter.
///
/// `short_code` and `original_url` are each unique across the store and never
/// change after insertion. `clicks` only grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    /// Store-assigned insertion sequence, used to order records created in the same instant.
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        clicks: i64,
    ) -> Self {
        Self {
            id,
            short_code,
            original_url,
            created_at,
            clicks,
        }
    }
}

/// Input data for inserting a new record. Clicks always start at zero.
#[derive(Debug, Clone)]
pub struct NewUrlRecord {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewUrlRecord {
    /// Stamps a new record with the current time.
    pub fn now(short_code: String, original_url: String) -> Self {
        Self {
            short_code,
            original_url,
            created_at: Utc::now(),
        }
    }
}
