//! Cache Store Module
//!
//! Main cache engine combining a key index with an arena-backed recency list
//! and lazy TTL expiration.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::entry::expiry_after;
use crate::cache::lru::SlotId;
use crate::cache::{CacheEntry, RecencyList};

// == Cache Store ==
/// Capacity-bounded cache with LRU eviction and per-entry TTL.
///
/// `index` maps every live key to its slot in `order`, and every slot in
/// `order` holds an entry whose key maps back to it. Expired entries stay in
/// place until a lookup finds them or eviction reaches them.
///
/// This type is not synchronized; see [`SharedCache`](crate::cache::SharedCache)
/// for the locked handle used by request handlers.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to slot lookup
    index: HashMap<K, SlotId>,
    /// Entries in recency order, MRU at the front
    order: RecencyList<CacheEntry<K, V>>,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            index: HashMap::with_capacity(capacity),
            order: RecencyList::with_capacity(capacity),
            capacity,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// An existing entry is updated in place and moved to the front, even if
    /// it has already expired. A new key evicts the least recently used entry
    /// first when the cache is full.
    pub fn set(&mut self, key: K, value: V, ttl: Duration) {
        self.set_with_expiry(key, value, expiry_after(Instant::now(), ttl));
    }

    /// Stores `value` under `key` with an explicit expiry instant.
    ///
    /// `None` stores an entry that never expires.
    pub fn set_with_expiry(&mut self, key: K, value: V, expires_at: Option<Instant>) {
        if let Some(&slot) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(slot) {
                entry.value = value;
                entry.expires_at = expires_at;
            }
            self.order.move_to_front(slot);
            return;
        }

        if self.order.len() >= self.capacity {
            self.evict_oldest();
        }

        let slot = self
            .order
            .push_front(CacheEntry::with_expiry(key.clone(), value, expires_at));
        self.index.insert(key, slot);
    }

    // == Get ==
    /// Retrieves the value for `key` and marks it most recently used.
    ///
    /// Returns None when the key is missing or expired. An expired entry is
    /// removed before returning.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        let expired = self
            .order
            .get(slot)
            .map_or(true, |entry| entry.is_expired_at(Instant::now()));

        if expired {
            self.remove_slot(slot);
            debug!("Purged expired entry on lookup");
            return None;
        }

        self.order.move_to_front(slot);
        self.order.get(slot).map(|entry| &entry.value)
    }

    // == Evict Oldest ==
    /// Removes the least recently used entry, regardless of its TTL.
    fn evict_oldest(&mut self) {
        if let Some(slot) = self.order.back() {
            self.remove_slot(slot);
            debug!(capacity = self.capacity, "Evicted least recently used entry");
        }
    }

    /// Unlinks a slot and drops its index mapping.
    fn remove_slot(&mut self, slot: SlotId) {
        if let Some(entry) = self.order.remove(slot) {
            self.index.remove(&entry.key);
        }
    }

    // == Length ==
    /// Returns the number of entries physically held, expired or not.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter().map(|(_, entry)| &entry.key)
    }

    /// Checks that the index and the recency list agree in both directions.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let list_agrees = self
            .order
            .iter()
            .all(|(slot, entry)| self.index.get(&entry.key) == Some(&slot));
        let index_agrees = self.index.iter().all(|(key, &slot)| {
            self.order
                .get(slot)
                .map_or(false, |entry| &entry.key == key)
        });

        list_agrees
            && index_agrees
            && self.index.len() == self.order.len()
            && self.order.len() <= self.capacity
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_store_new() {
        let store: CacheStore<String, String> = CacheStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut store = CacheStore::new(0);
        assert_eq!(store.capacity(), 1);

        store.set("a", 1, HOUR);
        store.set("b", 2, HOUR);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some(&2));
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100);

        store.set("key1".to_string(), "value1".to_string(), HOUR);

        assert_eq!(store.get("key1").map(String::as_str), Some("value1"));
        assert_eq!(store.len(), 1);
        assert!(store.is_consistent());
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store: CacheStore<String, String> = CacheStore::new(100);
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100);

        store.set("key1", "value1", HOUR);
        store.set("key1", "value2", HOUR);

        assert_eq!(store.get("key1"), Some(&"value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_capacity_overflow_evicts_lru() {
        let mut store = CacheStore::new(2);

        store.set("a", 1, HOUR);
        store.set("b", 2, HOUR);
        store.set("c", 3, HOUR);

        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some(&2));
        assert_eq!(store.get("c"), Some(&3));
        assert!(store.is_consistent());
    }

    #[test]
    fn test_get_protects_from_eviction() {
        let mut store = CacheStore::new(2);

        store.set("a", 1, HOUR);
        store.set("b", 2, HOUR);
        assert_eq!(store.get("a"), Some(&1));
        store.set("c", 3, HOUR);

        assert_eq!(store.get("b"), None);
        assert_eq!(store.get("a"), Some(&1));
        assert_eq!(store.get("c"), Some(&3));
    }

    #[test]
    fn test_update_moves_to_front_without_eviction() {
        let mut store = CacheStore::new(3);

        store.set("a", 1, HOUR);
        store.set("b", 2, HOUR);
        store.set("c", 3, HOUR);

        // Cache is full; updating an existing key must not evict
        store.set("a", 10, HOUR);
        assert_eq!(store.len(), 3);
        assert_eq!(store.keys().copied().collect::<Vec<_>>(), vec!["a", "c", "b"]);

        store.set("d", 4, HOUR);
        assert_eq!(store.get("b"), None);
        assert_eq!(store.get("a"), Some(&10));
    }

    #[test]
    fn test_ttl_expiration() {
        let mut store = CacheStore::new(100);

        store.set("x", 1, Duration::from_millis(1));
        sleep(Duration::from_millis(10));

        assert_eq!(store.get("x"), None);
    }

    #[test]
    fn test_expired_get_frees_capacity_slot() {
        let mut store = CacheStore::new(2);

        store.set("short", 1, Duration::from_millis(1));
        store.set("long", 2, HOUR);
        sleep(Duration::from_millis(10));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("short"), None);
        assert_eq!(store.len(), 1);

        // Slot was freed, so no eviction of "long"
        store.set("other", 3, HOUR);
        assert_eq!(store.get("long"), Some(&2));
        assert_eq!(store.get("other"), Some(&3));
        assert!(store.is_consistent());
    }

    #[test]
    fn test_zero_ttl_is_absent_on_next_get() {
        let mut store = CacheStore::new(10);

        store.set("k", "v", Duration::ZERO);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_refreshes_expired_entry() {
        let mut store = CacheStore::new(10);

        store.set("k", "old", Duration::from_millis(1));
        sleep(Duration::from_millis(10));
        store.set("k", "new", HOUR);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k"), Some(&"new"));
    }

    #[test]
    fn test_eviction_ignores_ttl() {
        let mut store = CacheStore::new(2);

        // "a" never expires but is the coldest entry
        store.set_with_expiry("a", 1, None);
        store.set("b", 2, Duration::from_millis(1));
        sleep(Duration::from_millis(10));

        store.set("c", 3, HOUR);

        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), None);
        assert_eq!(store.get("c"), Some(&3));
    }

    #[test]
    fn test_expired_victim_is_evicted_like_any_other() {
        let mut store = CacheStore::new(2);

        store.set("a", 1, Duration::from_millis(1));
        store.set("b", 2, HOUR);
        sleep(Duration::from_millis(10));

        store.set("c", 3, HOUR);

        assert_eq!(store.len(), 2);
        assert_eq!(store.keys().copied().collect::<Vec<_>>(), vec!["c", "b"]);
    }

    #[test]
    fn test_entry_without_expiry_persists() {
        let mut store = CacheStore::new(10);

        store.set_with_expiry("k", "v", None);
        sleep(Duration::from_millis(5));

        assert_eq!(store.get("k"), Some(&"v"));
    }

    #[test]
    fn test_keys_in_recency_order() {
        let mut store = CacheStore::new(10);

        store.set("a", 1, HOUR);
        store.set("b", 2, HOUR);
        store.set("c", 3, HOUR);
        store.get("a");

        assert_eq!(store.keys().copied().collect::<Vec<_>>(), vec!["a", "c", "b"]);
    }
}
