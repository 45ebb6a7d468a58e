//! Component Service
//!
//! Gated, cached access to rendered components.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheStats, TtlLruCache};
use crate::config::Config;
use crate::error::Result;
use crate::gate::{ConcurrencyGate, GatePermit};
use crate::render::{ArtifactRenderer, RenderedArtifact, TemplateRenderer};

// == Component Key ==
/// Cache key for a rendered component.
///
/// Kept as a structured pair so distinct (type, lang) pairs can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentKey {
    pub component_type: String,
    pub lang: String,
}

impl ComponentKey {
    pub fn new(component_type: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            lang: lang.into(),
        }
    }
}

/// Cache of rendered components shared by all requests.
pub type ComponentCache = TtlLruCache<ComponentKey, Arc<RenderedArtifact>>;

// == Fetched ==
/// A rendered component and whether it came from the cache.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub artifact: Arc<RenderedArtifact>,
    pub cache_hit: bool,
}

// == Component Service ==
/// Serves rendered components through the concurrency gate and cache.
///
/// Cloning is cheap; clones share the cache, gate and renderer.
#[derive(Clone)]
pub struct ComponentService {
    /// Single lock guarding every cache read and write
    cache: Arc<Mutex<ComponentCache>>,
    gate: ConcurrencyGate,
    renderer: Arc<dyn ArtifactRenderer>,
}

impl ComponentService {
    // == Constructor ==
    pub fn new(
        cache: ComponentCache,
        gate: ConcurrencyGate,
        renderer: Arc<dyn ArtifactRenderer>,
    ) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
            gate,
            renderer,
        }
    }

    /// Builds the service with the built-in template renderer.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TtlLruCache::new(config.cache_capacity, config.cache_ttl),
            ConcurrencyGate::with_timeout(config.concurrency_limit, config.acquire_timeout()),
            Arc::new(TemplateRenderer::new()),
        )
    }

    // == Fetch ==
    /// Returns the rendered component for `(component_type, lang)`.
    ///
    /// Holds a gate permit for the whole call; it is released on every exit
    /// path when the permit drops. A cache miss renders the component and
    /// stores it. Render failures are returned as-is and never cached.
    ///
    /// # Errors
    /// - `Overloaded` if the gate has a timeout and no slot freed in time
    /// - `UnknownComponentType` if the renderer does not know the type
    pub async fn fetch(&self, component_type: &str, lang: &str) -> Result<Fetched> {
        let _permit = self.gate.acquire().await?;

        let key = ComponentKey::new(component_type, lang);

        let cached = self.cache.lock().await.get(&key);
        if let Some(artifact) = cached {
            debug!(component_type, lang, "component served from cache");
            return Ok(Fetched {
                artifact,
                cache_hit: true,
            });
        }

        // Rendered outside the lock; concurrent misses on one key both
        // render and the last write wins.
        let artifact = Arc::new(self.renderer.render(component_type, lang)?);
        self.cache.lock().await.put(key, Arc::clone(&artifact));
        debug!(component_type, lang, "component rendered and cached");

        Ok(Fetched {
            artifact,
            cache_hit: false,
        })
    }

    // == Admit ==
    /// Passes through the gate without touching the cache.
    ///
    /// The caller is counted as in flight until the permit is dropped.
    pub async fn admit(&self) -> Result<GatePermit> {
        self.gate.acquire().await
    }

    pub async fn cache_size(&self) -> usize {
        self.cache.lock().await.size()
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }

    /// Drops every cached component, returning how many were removed.
    pub async fn clear_cache(&self) -> usize {
        self.cache.lock().await.clear()
    }

    pub fn concurrency_limit(&self) -> usize {
        self.gate.limit()
    }

    pub fn in_flight(&self) -> usize {
        self.gate.in_flight()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::error::ServiceError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Wraps the template renderer and counts calls.
    #[derive(Default)]
    struct CountingRenderer {
        renders: AtomicUsize,
    }

    impl ArtifactRenderer for CountingRenderer {
        fn render(&self, component_type: &str, lang: &str) -> Result<RenderedArtifact> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            TemplateRenderer.render(component_type, lang)
        }

        fn component_types(&self) -> Vec<String> {
            TemplateRenderer.component_types()
        }
    }

    /// Records how many renders overlap, as seen from inside the gate.
    struct OverlapRenderer {
        gate: ConcurrencyGate,
        active: AtomicUsize,
        max_active: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl ArtifactRenderer for OverlapRenderer {
        fn render(&self, component_type: &str, lang: &str) -> Result<RenderedArtifact> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(now, Ordering::SeqCst);
            self.max_in_flight
                .fetch_max(self.gate.in_flight(), Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(15));
            self.active.fetch_sub(1, Ordering::SeqCst);
            TemplateRenderer.render(component_type, lang)
        }

        fn component_types(&self) -> Vec<String> {
            TemplateRenderer.component_types()
        }
    }

    fn service_with(
        capacity: usize,
        limit: usize,
    ) -> (ComponentService, Arc<CountingRenderer>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let renderer = Arc::new(CountingRenderer::default());
        let service = ComponentService::new(
            TtlLruCache::with_clock(capacity, Duration::from_secs(600), clock.clone()),
            ConcurrencyGate::new(limit),
            renderer.clone(),
        );
        (service, renderer, clock)
    }

    #[test]
    fn test_component_key_is_structured() {
        assert_ne!(ComponentKey::new("a:b", "c"), ComponentKey::new("a", "b:c"));
        assert_eq!(ComponentKey::new("welcome", "en"), ComponentKey::new("welcome", "en"));
    }

    #[tokio::test]
    async fn test_first_fetch_misses_then_hits() {
        let (service, renderer, _) = service_with(50, 2);

        let first = service.fetch("welcome", "en").await.unwrap();
        let second = service.fetch("welcome", "en").await.unwrap();

        assert!(!first.cache_hit);
        assert!(second.cache_hit);
        assert!(Arc::ptr_eq(&first.artifact, &second.artifact));
        assert_eq!(first.artifact, second.artifact);
        assert_eq!(renderer.renders.load(Ordering::SeqCst), 1);
        assert_eq!(service.cache_size().await, 1);
    }

    #[tokio::test]
    async fn test_languages_are_cached_separately() {
        let (service, renderer, _) = service_with(50, 2);

        let en = service.fetch("welcome", "en").await.unwrap();
        let es = service.fetch("welcome", "es").await.unwrap();

        assert!(!en.cache_hit);
        assert!(!es.cache_hit);
        assert_eq!(es.artifact.language, "es");
        assert_eq!(renderer.renders.load(Ordering::SeqCst), 2);
        assert_eq!(service.cache_size().await, 2);
    }

    #[tokio::test]
    async fn test_unknown_type_is_not_cached() {
        let (service, _, _) = service_with(50, 2);
        service.fetch("footer", "en").await.unwrap();

        let result = service.fetch("bogus", "en").await;

        assert!(matches!(
            result,
            Err(ServiceError::UnknownComponentType { .. })
        ));
        assert_eq!(service.cache_size().await, 1);
    }

    #[tokio::test]
    async fn test_failure_releases_gate() {
        let (service, _, _) = service_with(50, 1);

        for _ in 0..3 {
            assert!(service.fetch("bogus", "en").await.is_err());
            assert_eq!(service.in_flight(), 0);
        }

        // A leaked permit would make this wait forever
        let fetched = tokio::time::timeout(
            Duration::from_secs(1),
            service.fetch("welcome", "en"),
        )
        .await
        .expect("gate should be free");
        assert!(fetched.is_ok());
    }

    #[tokio::test]
    async fn test_expired_entry_is_rerendered() {
        let (service, renderer, clock) = service_with(50, 2);

        service.fetch("welcome", "en").await.unwrap();
        clock.advance(Duration::from_secs(600));
        assert!(service.fetch("welcome", "en").await.unwrap().cache_hit);

        clock.advance(Duration::from_secs(1));
        let refetched = service.fetch("welcome", "en").await.unwrap();

        assert!(!refetched.cache_hit);
        assert_eq!(renderer.renders.load(Ordering::SeqCst), 2);
        assert_eq!(service.cache_stats().await.expirations, 1);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recent_component() {
        let (service, _, _) = service_with(2, 2);

        service.fetch("welcome", "en").await.unwrap();
        service.fetch("footer", "en").await.unwrap();
        service.fetch("welcome", "en").await.unwrap();
        service.fetch("navigation", "en").await.unwrap();

        assert_eq!(service.cache_size().await, 2);
        assert!(service.fetch("welcome", "en").await.unwrap().cache_hit);
        assert!(!service.fetch("footer", "en").await.unwrap().cache_hit);
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let (service, _, _) = service_with(50, 2);
        service.fetch("welcome", "en").await.unwrap();
        service.fetch("footer", "fr").await.unwrap();

        assert_eq!(service.clear_cache().await, 2);
        assert_eq!(service.cache_size().await, 0);
        assert!(!service.fetch("welcome", "en").await.unwrap().cache_hit);
    }

    #[tokio::test]
    async fn test_admit_counts_in_flight() {
        let (service, _, _) = service_with(50, 2);

        let permit = service.admit().await.unwrap();
        assert_eq!(service.in_flight(), 1);
        drop(permit);
        assert_eq!(service.in_flight(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrency_bound_with_ten_callers() {
        let gate = ConcurrencyGate::new(2);
        let renderer = Arc::new(OverlapRenderer {
            gate: gate.clone(),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        });
        let service = ComponentService::new(
            TtlLruCache::new(50, 600),
            gate,
            renderer.clone(),
        );

        let langs = ["en", "es", "fr", "de", "it"];
        let mut handles = Vec::new();
        for i in 0..10 {
            let service = service.clone();
            let component = if i % 2 == 0 { "welcome" } else { "footer" };
            let lang = langs[i / 2];
            handles.push(tokio::spawn(async move {
                let fetched = service.fetch(component, lang).await.unwrap();
                assert!(service.in_flight() <= 2);
                fetched
            }));
        }

        for handle in handles {
            assert!(!handle.await.unwrap().cache_hit);
        }

        assert!(renderer.max_active.load(Ordering::SeqCst) <= 2);
        assert!(renderer.max_in_flight.load(Ordering::SeqCst) <= 2);
        assert_eq!(service.in_flight(), 0);
        assert_eq!(service.cache_size().await, 10);
    }
}
