//! Read-Through Page Cache Module
//!
//! Serves pages of list-view records for (scope, page index, page size,
//! filters), falling through to an injected backing fetcher on miss and
//! writing the result back. List entries live under a short TTL; writes do
//! not invalidate them eagerly (see the invalidator for the tradeoff).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::{page_key, CacheStats, FilterMap, LocalStore};
use crate::error::{CacheError, Result};
use crate::invalidate::ManagedCache;

// == Page Result ==
/// One page of records plus the total count for pagination math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<R> {
    /// Records on this page
    pub records: Vec<R>,
    /// Total matching records across all pages
    pub total_count: u64,
}

impl<R> PageResult<R> {
    pub fn new(records: Vec<R>, total_count: u64) -> Self {
        Self {
            records,
            total_count,
        }
    }

    /// The "no data" page callers show when a backing fetch fails.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            total_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of pages at the given page size.
    pub fn page_count(&self, page_size: usize) -> u64 {
        if page_size == 0 {
            0
        } else {
            self.total_count.div_ceil(page_size as u64)
        }
    }
}

// == Backing Fetcher ==
/// Capability performing the actual data retrieval for a page.
///
/// Supplied by the repository/service layer and treated as opaque here.
/// Implementations must be idempotent reads: they may log or record
/// metrics, but must not mutate the entities they return.
pub trait PageFetcher<R>: Send + Sync {
    fn fetch_page(
        &self,
        page_index: usize,
        page_size: usize,
        filters: &FilterMap,
    ) -> anyhow::Result<PageResult<R>>;
}

impl<R, F> PageFetcher<R> for F
where
    F: Fn(usize, usize, &FilterMap) -> anyhow::Result<PageResult<R>> + Send + Sync,
{
    fn fetch_page(
        &self,
        page_index: usize,
        page_size: usize,
        filters: &FilterMap,
    ) -> anyhow::Result<PageResult<R>> {
        self(page_index, page_size, filters)
    }
}

// == Read-Through Cache ==
/// Read-through cache over one entity scope ("users", "trips", ...).
///
/// One instance per entity category, constructed by the host and usually
/// shared behind `Arc<RwLock<_>>` with the invalidator and admin surface.
pub struct ReadThroughCache<R: Clone> {
    /// Entity scope, embedded in every key and used as the stats label
    scope: String,
    /// Injected backing fetcher
    fetcher: Arc<dyn PageFetcher<R>>,
    /// Cached pages
    store: LocalStore<PageResult<R>>,
}

impl<R: Clone> ReadThroughCache<R> {
    /// Creates a cache for `scope` backed by `fetcher`.
    ///
    /// # Errors
    /// `Configuration` when `max_entries` or `ttl_secs` is zero; a cache
    /// that holds nothing or expires instantly is a misconfiguration, not
    /// something to paper over with defaults.
    pub fn new(
        scope: impl Into<String>,
        fetcher: Arc<dyn PageFetcher<R>>,
        max_entries: usize,
        ttl_secs: u64,
    ) -> Result<Self> {
        if max_entries == 0 {
            return Err(CacheError::Configuration(
                "page cache max_entries must be greater than zero".to_string(),
            ));
        }
        if ttl_secs == 0 {
            return Err(CacheError::Configuration(
                "page cache ttl_secs must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            scope: scope.into(),
            fetcher,
            store: LocalStore::new(max_entries, Some(ttl_secs * 1000)),
        })
    }

    // == Get Page ==
    /// Returns one page of records, consulting the cache first.
    ///
    /// A fresh entry is returned unchanged without touching the fetcher.
    /// On miss (or when `force_reload` is set) the fetcher runs, the
    /// result is written back, and the eviction bound is enforced. A
    /// fetcher failure is returned as `Fetch` and never cached; callers
    /// fall back to [`PageResult::empty`] and decide what to show and log.
    ///
    /// Two tasks racing on the same missing key may both fetch and both
    /// store; the last write wins. Both results are equally valid reads
    /// of the backing store, so no per-key locking is used.
    pub fn get_page(
        &mut self,
        page_index: usize,
        page_size: usize,
        filters: &FilterMap,
        force_reload: bool,
    ) -> Result<PageResult<R>> {
        if page_size == 0 {
            return Err(CacheError::InvalidRequest(
                "page_size must be greater than zero".to_string(),
            ));
        }

        let key = page_key(&self.scope, page_index, page_size, filters);

        if !force_reload {
            if let Some(page) = self.store.get(&key) {
                return Ok(page);
            }
        }

        let page = self
            .fetcher
            .fetch_page(page_index, page_size, filters)
            .map_err(|err| CacheError::Fetch {
                scope: self.scope.clone(),
                page_index,
                cause: format!("{err:#}"),
            })?;

        self.store.insert(key, page.clone());
        Ok(page)
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Drops every cached page.
    pub fn clear(&mut self) -> usize {
        self.store.clear()
    }

    /// Removes expired pages (background sweep hook).
    pub fn evict_expired(&mut self) -> usize {
        self.store.evict_expired()
    }
}

// == Managed Cache Implementation ==
impl<R: Clone + Send + Sync> ManagedCache for ReadThroughCache<R> {
    fn label(&self) -> &str {
        &self.scope
    }

    fn invalidate_entity(&mut self, _entity_id: &str) {
        // List pages rely on TTL expiry; mapping an entity back to every
        // page that embeds it costs more than the staleness it saves.
    }

    fn invalidate_all(&mut self) {
        self.store.clear();
    }

    fn evict_expired(&mut self) -> usize {
        self.store.evict_expired()
    }

    fn stats(&self) -> CacheStats {
        self.store.stats()
    }
}
