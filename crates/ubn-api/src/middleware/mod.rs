//! HTTP middleware
//!
//! Author: hephaex@gmail.com

pub mod cors;
pub mod metrics;

pub use cors::cors_layer;
pub use metrics::metrics_middleware;
