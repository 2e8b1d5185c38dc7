//! Cross-origin resource sharing.

use tower_http::cors::{Any, CorsLayer};

/// Allows any origin, method and header, so browser frontends served from
/// another origin can call the JSON API.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
