//! Cache Module
//!
//! Provides a bounded in-memory cache with TTL expiration and LRU eviction.

mod clock;
mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use lru::LruList;
pub use stats::CacheStats;
pub use store::TtlLruCache;
