//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_CAPACITY;

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Number of entries the cache holds; fixed at construction
    pub capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 8080)
    ///
    /// Capacity is always [`DEFAULT_CAPACITY`].
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            capacity: DEFAULT_CAPACITY,
        }
    }
}
