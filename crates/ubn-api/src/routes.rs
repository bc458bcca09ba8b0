//! API route definitions
//!
//! Author: hephaex@gmail.com

use crate::handlers::{company, health, root};
use crate::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Lookup routes under `/api`
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/company/:id", get(company::lookup_company))
}

/// Landing page and operational endpoints
pub fn service_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root::index))
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
}
