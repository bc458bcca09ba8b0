//! Request counting middleware
//!
//! Counts requests per route for the `/metrics` report
//!
//! Author: hephaex@gmail.com

use crate::state::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Bucket for requests that matched no route
pub const UNMATCHED_ENDPOINT: &str = "unmatched";

/// Request counting middleware
///
/// Requests are keyed by route template (`/api/company/:id`), so the number
/// of buckets is fixed by the router rather than by client input.
pub async fn metrics_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let endpoint = endpoint_key(request.extensions().get::<MatchedPath>());

    let response = next.run(request).await;

    state.record_request(endpoint).await;

    response
}

fn endpoint_key(matched: Option<&MatchedPath>) -> String {
    matched
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_string())
}
