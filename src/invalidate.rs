//! Invalidation Module
//!
//! Gives write-path code (comment creation, status updates, inbound email
//! processing) a single call that makes every registered cache consistent
//! after a mutation, without knowing cache internals.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::CacheStats;

// == Managed Cache ==
/// The invalidation and observability contract each cache instance
/// exposes, so heterogeneous generic caches can register under one
/// invalidator.
pub trait ManagedCache: Send + Sync {
    /// Label shown on the admin stats surface.
    fn label(&self) -> &str;

    /// Drops cached state tied to one entity.
    ///
    /// Panel caches clear eagerly and precisely. Page caches deliberately
    /// no-op here and let their short TTL age list entries out: finding
    /// every page that embeds a given entity is not cost-effective.
    fn invalidate_entity(&mut self, entity_id: &str);

    /// Drops everything.
    fn invalidate_all(&mut self);

    /// Removes expired entries; zero for stores without a TTL.
    fn evict_expired(&mut self) -> usize;

    /// Current counters.
    fn stats(&self) -> CacheStats;
}

/// A cache instance shared between callbacks, write paths and the admin
/// surface.
pub type SharedCache = Arc<RwLock<dyn ManagedCache>>;

// == Invalidator ==
/// Registry of every cache instance in the process.
///
/// Invalidation is in-process and fire-and-forget: it only ever touches
/// local maps, never the backing store, and holds no state across
/// restarts.
#[derive(Clone, Default)]
pub struct Invalidator {
    targets: Vec<SharedCache>,
}

impl Invalidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a cache instance. Typically called once at startup per
    /// entity category (users, trips, support tickets).
    pub fn register(&mut self, cache: SharedCache) {
        self.targets.push(cache);
    }

    /// Number of registered cache instances.
    pub fn cache_count(&self) -> usize {
        self.targets.len()
    }

    // == Invalidate Entity ==
    /// Drops cached state for one entity across all registered caches.
    pub async fn invalidate_entity(&self, entity_id: &str) {
        for target in &self.targets {
            target.write().await.invalidate_entity(entity_id);
        }
        debug!("invalidated cached state for entity {entity_id}");
    }

    // == Invalidate All ==
    /// Empties every registered cache (administrative cache reset).
    pub async fn invalidate_all(&self) {
        for target in &self.targets {
            target.write().await.invalidate_all();
        }
        debug!("cleared all registered caches");
    }

    // == Write-Path Triggers ==
    /// A comment was added to a ticket.
    pub async fn on_comment_added(&self, ticket_id: &str) {
        self.invalidate_entity(ticket_id).await;
    }

    /// An entity's status changed.
    pub async fn on_status_changed(&self, entity_id: &str) {
        self.invalidate_entity(entity_id).await;
    }

    /// An entity was mutated through any other write path (webhook
    /// ingestion, inbound email, repository edit).
    pub async fn on_entity_updated(&self, entity_id: &str) {
        self.invalidate_entity(entity_id).await;
    }

    // == Sweep ==
    /// Evicts expired entries across all caches, returning the total
    /// removed. Driven by the background sweep task.
    pub async fn evict_expired(&self) -> usize {
        let mut removed = 0;
        for target in &self.targets {
            removed += target.write().await.evict_expired();
        }
        removed
    }

    // == Stats ==
    /// Labelled counters for every registered cache.
    pub async fn stats(&self) -> Vec<(String, CacheStats)> {
        let mut out = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            let cache = target.read().await;
            out.push((cache.label().to_string(), cache.stats()));
        }
        out
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{FilterMap, PageFetcher, PageResult, PanelCache, PanelKind, ReadThroughCache};

    fn fetch_users(
        page_index: usize,
        page_size: usize,
        _filters: &FilterMap,
    ) -> anyhow::Result<PageResult<String>> {
        let records = (0..page_size)
            .map(|i| format!("user-{page_index}-{i}"))
            .collect();
        Ok(PageResult::new(records, 137))
    }

    fn shared_panels() -> Arc<RwLock<PanelCache<String>>> {
        Arc::new(RwLock::new(PanelCache::new("user_panels", 32).unwrap()))
    }

    fn shared_pages() -> Arc<RwLock<ReadThroughCache<String>>> {
        let fetcher: Arc<dyn PageFetcher<String>> = Arc::new(fetch_users);
        Arc::new(RwLock::new(
            ReadThroughCache::new("users", fetcher, 32, 60).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_invalidate_entity_is_scoped_to_panels() {
        let panels = shared_panels();
        let pages = shared_pages();

        {
            let mut guard = panels.write().await;
            guard.set("X", PanelKind::Profile, "a".to_string());
            guard.set("Y", PanelKind::Profile, "c".to_string());
        }
        pages
            .write()
            .await
            .get_page(0, 10, &FilterMap::new(), false)
            .unwrap();

        let mut invalidator = Invalidator::new();
        invalidator.register(panels.clone());
        invalidator.register(pages.clone());

        invalidator.invalidate_entity("X").await;

        let mut guard = panels.write().await;
        assert_eq!(guard.get("X", PanelKind::Profile), None);
        assert_eq!(guard.get("Y", PanelKind::Profile), Some("c".to_string()));
        drop(guard);

        // List pages are left to expire via TTL
        assert_eq!(pages.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_all_clears_every_cache() {
        let panels = shared_panels();
        let pages = shared_pages();

        panels
            .write()
            .await
            .set("X", PanelKind::Stats, "b".to_string());
        pages
            .write()
            .await
            .get_page(0, 10, &FilterMap::new(), false)
            .unwrap();

        let mut invalidator = Invalidator::new();
        invalidator.register(panels.clone());
        invalidator.register(pages.clone());
        assert_eq!(invalidator.cache_count(), 2);

        invalidator.invalidate_all().await;

        assert!(panels.read().await.is_empty());
        assert!(pages.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_write_path_triggers_map_to_entity_invalidation() {
        let panels = shared_panels();
        panels
            .write()
            .await
            .set("T-9", PanelKind::Comments, "old".to_string());

        let mut invalidator = Invalidator::new();
        invalidator.register(panels.clone());

        invalidator.on_comment_added("T-9").await;

        assert_eq!(panels.write().await.get("T-9", PanelKind::Comments), None);
    }

    #[tokio::test]
    async fn test_stats_reports_labels() {
        let mut invalidator = Invalidator::new();
        invalidator.register(shared_panels());
        invalidator.register(shared_pages());

        let stats = invalidator.stats().await;
        let labels: Vec<&str> = stats.iter().map(|(label, _)| label.as_str()).collect();

        assert_eq!(labels, vec!["user_panels", "users"]);
    }
}
