//! Request and Response models for the cache server API
//!
//! This module defines the query parameter and response body types, plus the
//! duration syntax accepted for TTLs.

pub mod duration;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use duration::{parse_duration, DurationParseError};
pub use requests::{GetParams, QueryPairs, SetParams};
pub use responses::{ErrorResponse, GetResponse, HealthResponse, SetResponse};
