//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Absolute URL validation

pub mod code_generator;
pub mod url_validator;
