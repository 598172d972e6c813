//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value together with its key and expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// The key this entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Absolute expiry instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new entry that expires `ttl` from now.
    ///
    /// A TTL too large for the monotonic clock produces an entry that never
    /// expires.
    pub fn new(key: K, value: V, ttl: Duration) -> Self {
        Self::with_expiry(key, value, expiry_after(Instant::now(), ttl))
    }

    /// Creates a new entry with an explicit expiry instant.
    pub fn with_expiry(key: K, value: V, expires_at: Option<Instant>) -> Self {
        Self {
            key,
            value,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// An entry is expired once `now` reaches its expiry instant, so a zero
    /// TTL is already expired on the next lookup.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Checks if the entry has expired as of the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

// == Utility Functions ==
/// Returns `now + ttl`, or None when that instant is not representable.
pub fn expiry_after(now: Instant, ttl: Duration) -> Option<Instant> {
    now.checked_add(ttl)
}
