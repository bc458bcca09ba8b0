//! Health check and metrics handlers
//!
//! Author: hephaex@gmail.com

use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub build_info: BuildInfo,
}

#[derive(Serialize, ToSchema)]
pub struct BuildInfo {
    pub name: String,
    pub rust_version: String,
}

/// Liveness probe - basic health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build_info: BuildInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            rust_version: env!("CARGO_PKG_RUST_VERSION").to_string(),
        },
    })
}

/// Per-source hit count
#[derive(Serialize, ToSchema)]
pub struct SourceMetrics {
    pub name: String,
    pub endpoint: String,
    pub hits: u64,
}

/// JSON metrics response
#[derive(Serialize, ToSchema)]
pub struct MetricsResponse {
    pub uptime_seconds: u64,
    pub total_requests: u64,
    pub lookups_total: u64,
    pub lookups_resolved: u64,
    pub lookups_not_found: u64,
    /// Sources in priority order
    pub sources: Vec<SourceMetrics>,
    pub requests_by_endpoint: BTreeMap<String, u64>,
}

/// Lookup counters since start
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "health",
    responses(
        (status = 200, description = "Current counters", body = MetricsResponse)
    )
)]
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sources = state
        .resolver
        .sources()
        .iter()
        .enumerate()
        .map(|(index, source)| SourceMetrics {
            name: source.name().to_string(),
            endpoint: source.endpoint(),
            hits: state.lookups.source_hits(index),
        })
        .collect();

    let requests_by_endpoint = state
        .endpoint_counts
        .read()
        .await
        .iter()
        .map(|(endpoint, count)| (endpoint.clone(), *count))
        .collect();

    Json(MetricsResponse {
        uptime_seconds: state.uptime_secs(),
        total_requests: state.get_request_count(),
        lookups_total: state.lookups.total(),
        lookups_resolved: state.lookups.resolved(),
        lookups_not_found: state.lookups.not_found(),
        sources,
        requests_by_endpoint,
    })
}
