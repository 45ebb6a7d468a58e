//! API Handlers
//!
//! HTTP request handlers for each component server endpoint.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::models::{
    ClearResponse, ComponentQuery, ComponentResponse, HealthResponse, StatsResponse,
};
use crate::service::ComponentService;

/// Application state shared across all handlers.
///
/// Built once at startup; every clone shares the same cache and gate.
#[derive(Clone)]
pub struct AppState {
    pub service: ComponentService,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(service: ComponentService) -> Self {
        Self { service }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(ComponentService::from_config(config))
    }
}

/// Handler for GET /api/component/:component_type
///
/// Returns the localized component, tagged with whether it was cached.
pub async fn component_handler(
    State(state): State<AppState>,
    Path(component_type): Path<String>,
    Query(query): Query<ComponentQuery>,
) -> Result<Json<ComponentResponse>> {
    let fetched = state.service.fetch(&component_type, query.lang()).await?;

    Ok(Json(ComponentResponse::from(fetched)))
}

/// Handler for GET /health
///
/// Passes through the concurrency gate like any other request, so a
/// saturated server is visible to health checks.
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let _permit = state.service.admit().await?;

    Ok(Json(HealthResponse::healthy(
        state.service.cache_size().await,
        state.service.concurrency_limit(),
    )))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.service.cache_stats().await;

    Json(StatsResponse::new(
        &stats,
        state.service.in_flight(),
        state.service.concurrency_limit(),
    ))
}

/// Handler for DELETE /api/cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let removed = state.service.clear_cache().await;
    info!("Component cache cleared: {} entries removed", removed);

    Json(ClearResponse::new(removed))
}
