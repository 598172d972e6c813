//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    GetParams, GetResponse, HealthResponse, QueryPairs, SetParams, SetResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache handle
    pub cache: SharedCache<String, String>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: SharedCache<String, String>) -> Self {
        Self { cache }
    }

    /// Creates a new AppState with a cache sized from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(SharedCache::new(config.capacity))
    }
}

/// Handler for GET /set
///
/// Stores a value under `key` for `duration`. An unparsable duration is
/// rejected before the cache is touched. Repeated parameters use their first
/// value.
pub async fn set_handler(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<SetResponse>> {
    let params = SetParams::from_pairs(&pairs);
    let ttl = params.ttl()?;

    state.cache.set(params.key, params.value, ttl);

    Ok(Json(SetResponse::success()))
}

/// Handler for GET /get
///
/// Retrieves a value from the cache by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<GetResponse>> {
    let params = GetParams::from_pairs(&pairs);
    let value = state
        .cache
        .get(params.key.as_str())
        .ok_or(CacheError::NotFound(params.key))?;

    Ok(Json(GetResponse::new(value)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
