//! UBN API - HTTP server for business name lookup
//!
//! Exposes `GET /api/company/{id}`, which resolves a unified business number
//! through the source chain and always answers `{"name": "..."}`.
//!
//! Author: hephaex@gmail.com

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use crate::state::AppState;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document
#[derive(OpenApi)]
#[openapi(
    info(title = "UBN Lookup API", description = "Business name lookup by unified business number"),
    paths(
        handlers::company::lookup_company,
        handlers::health::health_check,
        handlers::health::metrics,
    ),
    components(schemas(
        handlers::company::CompanyResponse,
        handlers::health::HealthResponse,
        handlers::health::BuildInfo,
        handlers::health::MetricsResponse,
        handlers::health::SourceMetrics,
        error::ApiError,
    )),
    tags(
        (name = "company", description = "Business name lookup"),
        (name = "health", description = "Liveness and counters")
    )
)]
pub struct ApiDoc;

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .merge(routes::service_routes())
        .nest("/api", routes::api_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http());

    if state.config.server.cors_enabled {
        router = router.layer(middleware::cors_layer());
    }

    router.with_state(state)
}

/// Router with no upstream sources, for exercising the HTTP surface
#[cfg(feature = "test-utils")]
pub fn create_router_for_testing() -> Router {
    let state = AppState::with_chain(
        ubn_core::AppConfig::default(),
        ubn_resolver::ResolutionChain::new(Vec::new()),
    );
    create_router(Arc::new(state))
}
