//! Cache Module
//!
//! The two cache tiers and their shared pieces: read-through page caching
//! with TTL expiry, panel memoization with entity-scoped invalidation,
//! deterministic key building and oldest-first eviction.

mod entry;
mod key;
mod order;
mod page;
mod panel;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use key::{page_key, FilterMap, PanelKey, PanelKind, FILTER_ANY};
pub use order::EvictionOrder;
pub use page::{PageFetcher, PageResult, ReadThroughCache};
pub use panel::{PanelCache, RendererRegistry};
pub use stats::CacheStats;
pub use store::LocalStore;
