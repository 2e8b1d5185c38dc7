//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations HTTP handlers
//! and the admin CLI call.
//!
//! - [`services::shortener_service::ShortenerService`] - Short code allocation, redirects and stats

pub mod services;
