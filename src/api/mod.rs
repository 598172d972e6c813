//! API Module
//!
//! HTTP handlers and routing for the cache server.
//!
//! # Endpoints
//! - `GET /set?key=&value=&duration=` - Store a value with a TTL
//! - `GET /get?key=` - Retrieve a value by key
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
