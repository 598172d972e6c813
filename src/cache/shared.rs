//! Shared Cache Module
//!
//! Thread-safe handle around [`CacheStore`] for concurrent request handlers.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::cache::CacheStore;

// == Shared Cache ==
/// Cloneable handle to a single cache instance guarded by one mutex.
///
/// Every operation holds the lock for its full duration, including any
/// eviction or purge it triggers, so concurrent calls behave as some
/// sequential interleaving. The lock is synchronous and never held across an
/// `.await`.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<CacheStore<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new shared cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self::from_store(CacheStore::new(capacity))
    }

    /// Wraps an existing store.
    pub fn from_store(store: CacheStore<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Stores `value` under `key`, expiring `ttl` from now.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        self.inner.lock().set(key, value, ttl);
    }

    /// Stores `value` under `key` with an explicit expiry, None = never.
    pub fn set_with_expiry(&self, key: K, value: V, expires_at: Option<Instant>) {
        self.inner.lock().set_with_expiry(key, value, expires_at);
    }

    /// Returns a copy of the live value for `key`, or None if missing or expired.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Returns the number of entries physically held.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Runs `f` against the locked store.
    #[cfg(test)]
    pub(crate) fn with_store<R>(&self, f: impl FnOnce(&CacheStore<K, V>) -> R) -> R {
        let store = self.inner.lock();
        f(&*store)
    }
}
