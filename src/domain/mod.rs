//! Domain layer containing business entities and storage contracts.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Storage trait definitions
//! - [`click_event`] - Click counting event model
//! - [`click_worker`] - Asynchronous click counting worker
//!
//! # Click Processing Flow
//!
//! 1. The shortener service resolves a redirect
//! 2. A [`click_event::ClickEvent`] is queued on a bounded channel
//! 3. [`click_worker::run_click_worker`] applies the increment with retry
//! 4. The counter is updated atomically via [`repositories::UrlRepository::increment_clicks`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
