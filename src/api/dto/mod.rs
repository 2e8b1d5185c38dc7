//! Data Transfer Objects for API requests and responses.
//!
//! Response bodies use camelCase field names (`shortCode`, `originalUrl`,
//! `createdAt`, `clicks`).

pub mod health;
pub mod recent;
pub mod shorten;
pub mod url_record;
