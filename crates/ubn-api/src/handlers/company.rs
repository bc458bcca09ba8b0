//! Business name lookup handler
//!
//! Author: hephaex@gmail.com

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Lookup response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    /// Entity name, empty when no registry knows the number
    #[schema(example = "台灣積體電路製造股份有限公司")]
    pub name: String,
}

/// Resolve a unified business number to its registered name
///
/// Always answers 200; an empty `name` means not found.
#[utoipa::path(
    get,
    path = "/api/company/{id}",
    tag = "company",
    params(
        ("id" = String, Path, description = "Unified business number")
    ),
    responses(
        (status = 200, description = "Lookup finished", body = CompanyResponse)
    )
)]
pub async fn lookup_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<CompanyResponse> {
    tracing::info!(ubn = %id, "Lookup requested");

    let resolution = state.resolver.resolve_detailed(&id).await;
    state.lookups.record(resolution.as_ref());

    Json(CompanyResponse {
        name: resolution.map(|r| r.name).unwrap_or_default(),
    })
}
