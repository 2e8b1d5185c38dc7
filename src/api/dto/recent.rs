//! Query parameters for the recent-URLs endpoint.

use serde::Deserialize;

use crate::application::services::DEFAULT_RECENT_LIMIT;

/// Largest page the recent endpoint will return.
pub const MAX_RECENT_LIMIT: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

impl RecentQuery {
    /// Requested limit clamped to `1..=MAX_RECENT_LIMIT`, defaulting to five.
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .clamp(1, MAX_RECENT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_limit() {
        assert_eq!(RecentQuery::default().effective_limit(), 5);
        assert_eq!(RecentQuery { limit: Some(0) }.effective_limit(), 1);
        assert_eq!(RecentQuery { limit: Some(20) }.effective_limit(), 20);
        assert_eq!(RecentQuery { limit: Some(5000) }.effective_limit(), 100);
    }
}
