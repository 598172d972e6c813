//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{get_handler, health_handler, set_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /set?key=&value=&duration=` - Store a value with a TTL
/// - `GET /get?key=` - Retrieve a value by key
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, method and header
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", get(set_handler))
        .route("/get", get(get_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
