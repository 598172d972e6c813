//! Cache Module
//!
//! Provides a capacity-bounded in-memory cache with LRU eviction and lazy TTL
//! expiration.

mod entry;
mod lru;
mod shared;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::{RecencyList, SlotId};
pub use shared::SharedCache;
pub use store::CacheStore;

// == Public Constants ==
/// Number of entries the server's cache is constructed with
pub const DEFAULT_CAPACITY: usize = 1024;
