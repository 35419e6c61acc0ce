//! Cache Key Module
//!
//! Deterministic key construction for the two cache namespaces: list pages
//! keyed by (scope, page index, page size, filters) and rendered panels
//! keyed by (entity id, panel kind).

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Active filter set for a list view, filter name to selected value.
pub type FilterMap = HashMap<String, String>;

/// Sentinel dropdown value meaning "no filtering on this field".
pub const FILTER_ANY: &str = "all";

fn is_active_filter(value: &str) -> bool {
    !value.is_empty() && value != FILTER_ANY
}

// == Page Keys ==
/// Builds the cache key for one page of a filtered list view.
///
/// Filter entries whose value is empty or the `"all"` sentinel do not
/// participate, and the remaining names are sorted, so two logically
/// identical requests always map to the same key regardless of map
/// iteration order. Page index and size are always part of the key:
/// changing pagination can never alias another page's entry.
pub fn page_key(scope: &str, page_index: usize, page_size: usize, filters: &FilterMap) -> String {
    let active: BTreeMap<&str, &str> = filters
        .iter()
        .filter(|(_, value)| is_active_filter(value))
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    let mut key = format!("{scope}:p{page_index}:n{page_size}");
    for (name, value) in active {
        key.push('|');
        key.push_str(name);
        key.push(':');
        key.push_str(value);
    }
    key
}

// == Panel Kinds ==
/// The panel types a detail view can render for one entity.
///
/// An explicit enum rather than free-form strings: renderers are looked up
/// per kind in a registry populated at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Profile,
    Stats,
    Trips,
    Details,
    Comments,
}

impl PanelKind {
    /// All panel kinds, in display order.
    pub const ALL: [PanelKind; 5] = [
        PanelKind::Profile,
        PanelKind::Stats,
        PanelKind::Trips,
        PanelKind::Details,
        PanelKind::Comments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PanelKind::Profile => "profile",
            PanelKind::Stats => "stats",
            PanelKind::Trips => "trips",
            PanelKind::Details => "details",
            PanelKind::Comments => "comments",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Panel Keys ==
/// Key for one rendered panel: entity id plus panel kind.
///
/// Entity ids are opaque strings; callers stringify structured identifiers
/// before keying. Panel keys are entity-scoped, not page-scoped, which is
/// what makes precise per-entity invalidation possible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PanelKey {
    pub entity_id: String,
    pub kind: PanelKind,
}

impl PanelKey {
    pub fn new(entity_id: impl Into<String>, kind: PanelKind) -> Self {
        Self {
            entity_id: entity_id.into(),
            kind,
        }
    }
}

impl fmt::Display for PanelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.entity_id, self.kind)
    }
}
