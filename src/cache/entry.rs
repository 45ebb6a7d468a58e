//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value together with its key and the time it was last written.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// Key the entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
    /// When the entry was inserted or last overwritten
    pub inserted_at: Instant,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    pub fn new(key: K, value: V, now: Instant) -> Self {
        Self {
            key,
            value,
            inserted_at: now,
        }
    }

    // == Refresh ==
    /// Replaces the value and restarts the TTL window.
    pub fn refresh(&mut self, value: V, now: Instant) {
        self.value = value;
        self.inserted_at = now;
    }

    // == Age ==
    /// Time since the entry was written, saturating at zero.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals `ttl` exactly is still
    /// live. It expires only once the age is strictly greater.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) > ttl
    }
}
