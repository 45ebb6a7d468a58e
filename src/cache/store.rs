//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with an LRU list and TTL expiration.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, LruList, SystemClock};

/// Upper bound on storage reserved when the cache is built. `capacity` is a
/// limit; larger caches grow on demand.
const INITIAL_RESERVE: usize = 64;

// == TTL LRU Cache ==
/// Bounded cache with lazy TTL expiry and least-recently-used eviction.
///
/// `index` maps each key to its slot in `order`; both always hold the same
/// set of keys and `order.len() <= capacity` after every operation.
#[derive(Debug)]
pub struct TtlLruCache<K, V> {
    /// Key to slot lookup
    index: HashMap<K, usize>,
    /// Entries in recency order, head = least recently used
    order: LruList<CacheEntry<K, V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Lifetime of an entry since its last write
    ttl: Duration,
    /// Time source for expiry checks
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlLruCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new cache with specified capacity and TTL in seconds.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries the cache can hold
    /// * `ttl_seconds` - Seconds an entry stays live after its last write
    pub fn new(capacity: usize, ttl_seconds: u64) -> Self {
        Self::with_clock(capacity, Duration::from_secs(ttl_seconds), Arc::new(SystemClock))
    }

    /// Creates a new cache reading time from `clock`.
    pub fn with_clock(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let reserve = capacity.min(INITIAL_RESERVE);
        Self {
            index: HashMap::with_capacity(reserve),
            order: LruList::with_capacity(reserve),
            stats: CacheStats::new(),
            capacity,
            ttl,
            clock,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A live entry is moved to the most recently used position. An entry
    /// older than the TTL is removed and reported as absent.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let Some(&slot) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let now = self.clock.now();
        let expired = self
            .order
            .get(slot)
            .map_or(true, |entry| entry.is_expired(self.ttl, now));

        if expired {
            self.index.remove(key);
            self.order.remove(slot);
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!(?key, "cache entry expired");
            return None;
        }

        self.order.move_to_back(slot);
        self.stats.record_hit();
        self.order.get(slot).map(|entry| entry.value.clone())
    }

    // == Put ==
    /// Stores a value under `key`.
    ///
    /// An existing key has its value replaced, its TTL restarted, and becomes
    /// most recently used. A new key arriving at a full cache first evicts
    /// the least recently used entry. With zero capacity nothing is stored.
    pub fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        let now = self.clock.now();

        if let Some(&slot) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(slot) {
                entry.refresh(value, now);
            }
            self.order.move_to_back(slot);
            return;
        }

        if self.order.len() >= self.capacity {
            // Nothing to evict is a no-op
            if let Some(evicted) = self.order.pop_front() {
                self.index.remove(&evicted.key);
                self.stats.record_eviction();
                debug!(key = ?evicted.key, "evicted least recently used entry");
            }
        }

        let slot = self.order.push_back(CacheEntry::new(key.clone(), value, now));
        self.index.insert(key, slot);
    }

    // == Peek ==
    /// Returns a live value without touching recency, expiry or stats.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        let now = self.clock.now();
        self.order
            .get(slot)
            .filter(|entry| !entry.is_expired(self.ttl, now))
            .map(|entry| &entry.value)
    }

    // == Clear ==
    /// Removes all entries unconditionally, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.order.len();
        self.index.clear();
        self.order.clear();
        removed
    }

    // == Keys ==
    /// Keys from least to most recently used, expired entries included.
    pub fn keys(&self) -> Vec<K> {
        self.order.iter().map(|entry| entry.key.clone()).collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.order.len());
        stats
    }
}

impl<K, V> TtlLruCache<K, V> {
    // == Size ==
    /// Number of stored entries, including expired ones not yet read.
    pub fn size(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    const TTL: Duration = Duration::from_secs(600);

    fn cache_with_clock(capacity: usize) -> (TtlLruCache<&'static str, i32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TtlLruCache::with_clock(capacity, TTL, clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_store_new() {
        let cache: TtlLruCache<String, String> = TtlLruCache::new(50, 600);
        assert_eq!(cache.size(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 50);
        assert_eq!(cache.ttl(), Duration::from_secs(600));
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut cache: TtlLruCache<u8, u8> = TtlLruCache::new(usize::MAX / 2, 600);

        cache.put(1, 10);

        assert_eq!(cache.capacity(), usize::MAX / 2);
        assert_eq!(cache.get(&1), Some(10));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_put_and_get() {
        let (mut cache, _) = cache_with_clock(10);

        cache.put("a", 1);

        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_get_missing() {
        let (mut cache, _) = cache_with_clock(10);
        assert_eq!(cache.get(&"missing"), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_overwrite_keeps_size() {
        let (mut cache, _) = cache_with_clock(10);

        cache.put("a", 1);
        cache.put("a", 2);

        assert_eq!(cache.get(&"a"), Some(2));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_idempotent_reput() {
        let (mut cache, _) = cache_with_clock(10);

        cache.put("k", 7);
        let before = cache.size();
        cache.put("k", 7);

        assert_eq!(cache.size(), before);
        assert_eq!(cache.get(&"k"), Some(7));
    }

    #[test]
    fn test_lru_eviction_after_touch() {
        let (mut cache, _) = cache_with_clock(2);

        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.put("c", 3);

        assert_eq!(cache.size(), 2);
        assert_eq!(cache.peek(&"b"), None);
        assert_eq!(cache.keys(), vec!["a", "c"]);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_lru_eviction_insertion_order() {
        let (mut cache, _) = cache_with_clock(3);

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        cache.put("d", 4);

        assert_eq!(cache.keys(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_reput_bumps_recency() {
        let (mut cache, _) = cache_with_clock(2);

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("a", 1);
        cache.put("c", 3);

        assert_eq!(cache.keys(), vec!["a", "c"]);
    }

    #[test]
    fn test_expiry_is_strictly_after_ttl() {
        let (mut cache, clock) = cache_with_clock(10);

        cache.put("a", 1);

        clock.advance(TTL);
        assert_eq!(cache.get(&"a"), Some(1), "Entry should be live at exactly ttl");

        clock.advance(Duration::from_millis(1));
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.size(), 0);

        let stats = cache.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_get_does_not_extend_ttl() {
        let (mut cache, clock) = cache_with_clock(10);

        cache.put("a", 1);
        clock.advance(Duration::from_secs(500));
        assert_eq!(cache.get(&"a"), Some(1));

        clock.advance(Duration::from_secs(101));
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn test_put_refreshes_ttl() {
        let (mut cache, clock) = cache_with_clock(10);

        cache.put("a", 1);
        clock.advance(Duration::from_secs(500));
        cache.put("a", 1);
        clock.advance(Duration::from_secs(500));

        assert_eq!(cache.get(&"a"), Some(1));
    }

    #[test]
    fn test_expired_entries_count_toward_size_until_read() {
        let (mut cache, clock) = cache_with_clock(10);

        cache.put("a", 1);
        cache.put("b", 2);
        clock.advance(TTL + Duration::from_secs(1));

        assert_eq!(cache.size(), 2);
        assert_eq!(cache.peek(&"a"), None);
        assert_eq!(cache.size(), 2);

        cache.get(&"a");
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let (mut cache, _) = cache_with_clock(0);

        cache.put("a", 1);

        assert_eq!(cache.size(), 0);
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn test_capacity_one() {
        let (mut cache, _) = cache_with_clock(1);

        cache.put("a", 1);
        cache.put("b", 2);

        assert_eq!(cache.keys(), vec!["b"]);
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn test_clear() {
        let (mut cache, _) = cache_with_clock(10);

        cache.put("a", 1);
        cache.put("b", 2);

        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);

        cache.put("c", 3);
        assert_eq!(cache.keys(), vec!["c"]);
    }

    #[test]
    fn test_stats_tracks_entries() {
        let (mut cache, _) = cache_with_clock(10);

        cache.put("a", 1);
        cache.get(&"a");
        cache.get(&"nope");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_real_clock_expiry() {
        let mut cache: TtlLruCache<String, String> =
            TtlLruCache::with_clock(10, Duration::from_millis(50), Arc::new(SystemClock));

        cache.put("k".to_string(), "v".to_string());
        assert!(cache.get(&"k".to_string()).is_some());

        std::thread::sleep(Duration::from_millis(80));

        assert!(cache.get(&"k".to_string()).is_none());
    }
}
