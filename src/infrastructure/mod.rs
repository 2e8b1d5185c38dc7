//! Infrastructure layer for external integrations.
//!
//! - [`cache`] - Redirect cache (Redis and no-op implementations)
//! - [`persistence`] - URL repository implementations

pub mod cache;
pub mod persistence;
