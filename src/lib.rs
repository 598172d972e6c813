//! LRU TTL Cache - A small in-memory get/set cache server
//!
//! Bounded key-value storage with least-recently-used eviction and lazy
//! per-entry TTL expiration.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheStore, SharedCache};
pub use config::Config;
