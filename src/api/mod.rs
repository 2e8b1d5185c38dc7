//! REST API layer for HTTP request/response handling.
//!
//! - [`dto`] - Request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - CORS and request tracing
//! - [`routes`] - JSON API route table

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
