//! Panel Cache Module
//!
//! Memoizes rendered display artifacts per (entity id, panel kind). No
//! TTL: an artifact stays valid until the entity is mutated and the write
//! path invalidates it, or until the size cap evicts a batch of old
//! entries. This is a pure memoization cache, unlike the time-bound page
//! cache.

use std::collections::HashMap;

use crate::cache::{CacheStats, EvictionOrder, PanelKey, PanelKind};
use crate::error::{CacheError, Result};
use crate::invalidate::ManagedCache;

/// Fraction of capacity dropped per overflow, oldest insertions first.
const EVICTION_BATCH_DIVISOR: usize = 8;

// == Panel Cache ==
/// Entity-scoped artifact cache for one entity category.
///
/// The artifact type is opaque; callers store whatever their render step
/// produces (pre-built display fragments, serialized components, ...).
pub struct PanelCache<A: Clone> {
    /// Label shown on the admin stats surface ("user_panels", ...)
    label: String,
    /// Stored artifacts
    artifacts: HashMap<PanelKey, A>,
    /// Insertion-order tracker driving batch eviction
    order: EvictionOrder<PanelKey>,
    /// Performance counters
    stats: CacheStats,
    /// Maximum number of artifacts held
    max_entries: usize,
}

impl<A: Clone> PanelCache<A> {
    /// Creates a panel cache.
    ///
    /// # Errors
    /// `Configuration` when `max_entries` is zero.
    pub fn new(label: impl Into<String>, max_entries: usize) -> Result<Self> {
        if max_entries == 0 {
            return Err(CacheError::Configuration(
                "panel cache max_entries must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            label: label.into(),
            artifacts: HashMap::new(),
            order: EvictionOrder::new(),
            stats: CacheStats::new(),
            max_entries,
        })
    }

    // == Get ==
    /// Direct lookup, no expiry semantics.
    pub fn get(&mut self, entity_id: &str, kind: PanelKind) -> Option<A> {
        let key = PanelKey::new(entity_id, kind);
        match self.artifacts.get(&key) {
            Some(artifact) => {
                self.stats.record_hit();
                Some(artifact.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores an artifact for one entity panel.
    ///
    /// When the cap is exceeded, a batch of the oldest insertions is
    /// dropped. Insertion order stands in for recency, which is close
    /// enough for display fragments.
    pub fn set(&mut self, entity_id: impl Into<String>, kind: PanelKind, artifact: A) {
        let key = PanelKey::new(entity_id, kind);
        self.artifacts.insert(key.clone(), artifact);
        self.order.record(&key);

        if self.artifacts.len() > self.max_entries {
            let batch = (self.max_entries / EVICTION_BATCH_DIVISOR).max(1);
            let target = (self.max_entries - batch).max(1);
            while self.artifacts.len() > target {
                match self.order.pop_oldest() {
                    Some(oldest) => {
                        self.artifacts.remove(&oldest);
                        self.stats.record_eviction();
                    }
                    None => break,
                }
            }
        }

        self.stats.set_total_entries(self.artifacts.len());
    }

    // == Get Or Render ==
    /// Returns the memoized artifact, rendering and storing it on miss.
    ///
    /// Render failures propagate and are not cached; a transient error
    /// should not stick around as the entity's panel.
    pub fn get_or_render<D>(
        &mut self,
        registry: &RendererRegistry<D, A>,
        entity_id: &str,
        kind: PanelKind,
        data: &D,
    ) -> Result<A> {
        if let Some(artifact) = self.get(entity_id, kind) {
            return Ok(artifact);
        }

        let artifact = registry.render(kind, entity_id, data)?;
        self.set(entity_id, kind, artifact.clone());
        Ok(artifact)
    }

    // == Clear ==
    /// Drops every artifact for one entity, across all panel kinds.
    ///
    /// Called whenever the underlying entity is mutated (comment added,
    /// status changed, webhook ingested). Returns the count dropped.
    pub fn clear(&mut self, entity_id: &str) -> usize {
        let before = self.artifacts.len();
        self.artifacts.retain(|key, _| key.entity_id != entity_id);
        self.order.retain(|key| key.entity_id != entity_id);

        let dropped = before - self.artifacts.len();
        self.stats.record_invalidations(dropped as u64);
        self.stats.set_total_entries(self.artifacts.len());
        dropped
    }

    // == Clear All ==
    /// Empties the store (administrative cache reset).
    pub fn clear_all(&mut self) -> usize {
        let dropped = self.artifacts.len();
        self.artifacts.clear();
        self.order.clear();
        self.stats.record_invalidations(dropped as u64);
        self.stats.set_total_entries(0);
        dropped
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.artifacts.len());
        stats
    }
}

// == Managed Cache Implementation ==
impl<A: Clone + Send + Sync> ManagedCache for PanelCache<A> {
    fn label(&self) -> &str {
        &self.label
    }

    fn invalidate_entity(&mut self, entity_id: &str) {
        self.clear(entity_id);
    }

    fn invalidate_all(&mut self) {
        self.clear_all();
    }

    fn evict_expired(&mut self) -> usize {
        // Artifacts have no TTL; only invalidation or the size cap
        // removes them.
        0
    }

    fn stats(&self) -> CacheStats {
        PanelCache::stats(self)
    }
}

// == Renderer Registry ==
/// Renderer for one panel kind: (entity id, entity data) to artifact.
type RenderFn<D, A> = Box<dyn Fn(&str, &D) -> anyhow::Result<A> + Send + Sync>;

/// Explicit panel-kind to renderer mapping, populated at startup.
///
/// `D` is whatever entity data the UI layer passes to its renderers and
/// `A` the artifact type it stores; both are opaque here. The registry
/// replaces looking renderers up by string name at call time: every kind
/// is wired to a concrete function before the first request.
pub struct RendererRegistry<D, A> {
    renderers: HashMap<PanelKind, RenderFn<D, A>>,
}

impl<D, A> RendererRegistry<D, A> {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registers the renderer for one panel kind, replacing any previous
    /// registration.
    pub fn register<F>(&mut self, kind: PanelKind, renderer: F)
    where
        F: Fn(&str, &D) -> anyhow::Result<A> + Send + Sync + 'static,
    {
        self.renderers.insert(kind, Box::new(renderer));
    }

    /// Renders one panel for an entity.
    ///
    /// # Errors
    /// `RendererMissing` when the kind was never registered, `Render`
    /// when the renderer itself fails.
    pub fn render(&self, kind: PanelKind, entity_id: &str, data: &D) -> Result<A> {
        let renderer = self
            .renderers
            .get(&kind)
            .ok_or(CacheError::RendererMissing(kind))?;

        renderer(entity_id, data).map_err(|err| CacheError::Render {
            kind,
            entity_id: entity_id.to_string(),
            cause: format!("{err:#}"),
        })
    }

    pub fn is_registered(&self, kind: PanelKind) -> bool {
        self.renderers.contains_key(&kind)
    }
}

impl<D, A> Default for RendererRegistry<D, A> {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn cache() -> PanelCache<String> {
        PanelCache::new("user_panels", 8).unwrap()
    }

    #[test]
    fn test_set_and_get() {
        let mut panels = cache();

        panels.set("U-1", PanelKind::Profile, "profile html".to_string());

        assert_eq!(
            panels.get("U-1", PanelKind::Profile),
            Some("profile html".to_string())
        );
        assert_eq!(panels.get("U-1", PanelKind::Stats), None);
    }

    #[test]
    fn test_clear_is_entity_scoped() {
        let mut panels = cache();

        panels.set("X", PanelKind::Profile, "a".to_string());
        panels.set("X", PanelKind::Stats, "b".to_string());
        panels.set("Y", PanelKind::Profile, "c".to_string());

        assert_eq!(panels.clear("X"), 2);

        assert_eq!(panels.get("X", PanelKind::Profile), None);
        assert_eq!(panels.get("X", PanelKind::Stats), None);
        assert_eq!(panels.get("Y", PanelKind::Profile), Some("c".to_string()));
    }

    #[test]
    fn test_clear_all() {
        let mut panels = cache();

        panels.set("X", PanelKind::Profile, "a".to_string());
        panels.set("Y", PanelKind::Trips, "b".to_string());

        assert_eq!(panels.clear_all(), 2);
        assert!(panels.is_empty());
        assert_eq!(panels.stats().invalidations, 2);
    }

    #[test]
    fn test_overflow_evicts_a_batch_of_oldest_entries() {
        // Capacity 8, batch = max(8/8, 1) = 1, so the ninth insert drops
        // the two oldest entries (overflow plus batch headroom).
        let mut panels = cache();

        for i in 0..9 {
            panels.set(format!("E-{i}"), PanelKind::Profile, format!("html {i}"));
        }

        assert_eq!(panels.len(), 7);
        assert_eq!(panels.get("E-0", PanelKind::Profile), None);
        assert_eq!(panels.get("E-1", PanelKind::Profile), None);
        assert!(panels.get("E-8", PanelKind::Profile).is_some());
        assert_eq!(panels.stats().evictions, 2);
    }

    #[test]
    fn test_zero_capacity_is_a_configuration_error() {
        let result: Result<PanelCache<String>> = PanelCache::new("panels", 0);
        assert!(matches!(result, Err(CacheError::Configuration(_))));
    }

    #[test]
    fn test_get_or_render_memoizes() {
        let mut panels = cache();
        let renders = Arc::new(AtomicUsize::new(0));

        let mut registry: RendererRegistry<String, String> = RendererRegistry::new();
        let counter = renders.clone();
        registry.register(PanelKind::Comments, move |entity_id: &str, data: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(format!("<div>{entity_id}: {data}</div>"))
        });

        let data = "3 comments".to_string();
        let first = panels
            .get_or_render(&registry, "T-1", PanelKind::Comments, &data)
            .unwrap();
        let second = panels
            .get_or_render(&registry, "T-1", PanelKind::Comments, &data)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(renders.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_get_or_render_rerenders_after_invalidation() {
        let mut panels = cache();
        let renders = Arc::new(AtomicUsize::new(0));

        let mut registry: RendererRegistry<String, String> = RendererRegistry::new();
        let counter = renders.clone();
        registry.register(PanelKind::Comments, move |_: &str, data: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(data.clone())
        });

        panels
            .get_or_render(&registry, "T-1", PanelKind::Comments, &"v1".to_string())
            .unwrap();
        panels.clear("T-1");

        let rerendered = panels
            .get_or_render(&registry, "T-1", PanelKind::Comments, &"v2".to_string())
            .unwrap();

        assert_eq!(rerendered, "v2");
        assert_eq!(renders.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_render_error_is_not_cached() {
        let mut panels = cache();
        let attempts = Arc::new(AtomicUsize::new(0));

        let mut registry: RendererRegistry<String, String> = RendererRegistry::new();
        let counter = attempts.clone();
        registry.register(PanelKind::Details, move |_: &str, _: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(anyhow::anyhow!("template exploded"))
        });

        let data = "payload".to_string();
        for _ in 0..2 {
            let err = panels
                .get_or_render(&registry, "T-1", PanelKind::Details, &data)
                .unwrap_err();
            assert!(matches!(err, CacheError::Render { .. }));
        }

        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert!(panels.is_empty());
    }

    #[test]
    fn test_missing_renderer() {
        let registry: RendererRegistry<String, String> = RendererRegistry::new();

        assert!(!registry.is_registered(PanelKind::Trips));
        let err = registry
            .render(PanelKind::Trips, "U-1", &"data".to_string())
            .unwrap_err();
        assert!(matches!(err, CacheError::RendererMissing(PanelKind::Trips)));
    }
}
