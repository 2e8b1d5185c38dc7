//! Core domain entities.
//!
//! - [`UrlRecord`] - A stored short code → URL mapping with its click counter
//! - [`NewUrlRecord`] - Input for inserting a record

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord};
