//! CORS configuration
//!
//! The lookup API is public: any origin, method and header is allowed.
//!
//! Author: hephaex@gmail.com

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS layer
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
