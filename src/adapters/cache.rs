use crate::domain::edge_type::EdgeType;
use crate::domain::ports::EdgeTypeCache;
use dashmap::DashMap;

/// Process-wide edge type cache.
///
/// Concurrent population of the same key is last-write-wins; every writer
/// stores the same resolved handle.
#[derive(Debug, Default)]
pub struct SharedEdgeTypeCache {
    entries: DashMap<String, EdgeType>,
}

impl SharedEdgeTypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EdgeTypeCache for SharedEdgeTypeCache {
    fn get(&self, key: &str) -> Option<EdgeType> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: EdgeType) {
        self.entries.insert(key.to_string(), value);
    }

    fn clear(&self) {
        self.entries.clear();
    }
}
