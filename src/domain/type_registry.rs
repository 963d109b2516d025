//! Edge Type Registry - resolves canonical edge type names to store handles
//!
//! Handles are looked up in the backing store once and memoized in a shared
//! cache. A name whose definition does not exist yet resolves to `None` and is
//! not cached, so the next call retries (first-run bootstrap). Concurrent first
//! access may look the same name up twice; both writes store the same value.

use crate::domain::edge_type::{EdgeType, EdgeTypeName};
use crate::domain::error::StoreError;
use crate::domain::ports::{EdgeTypeCache, GraphStore};
use std::sync::Arc;

/// Edge Type Registry - injected into every interaction component
#[derive(Clone)]
pub struct EdgeTypeRegistry {
    store: Arc<dyn GraphStore>,
    cache: Arc<dyn EdgeTypeCache>,
}

impl EdgeTypeRegistry {
    pub fn new(store: Arc<dyn GraphStore>, cache: Arc<dyn EdgeTypeCache>) -> Self {
        Self { store, cache }
    }

    /// Resolve a name to its handle; `None` when the type is not defined
    pub fn resolve(&self, name: EdgeTypeName) -> Result<Option<EdgeType>, StoreError> {
        if let Some(edge_type) = self.cache.get(name.cache_key()) {
            return Ok(Some(edge_type));
        }

        match self.store.edge_type_lookup(name.as_str())? {
            Some(edge_type) => {
                tracing::debug!(name = %name, id = edge_type.id, "edge type resolved");
                self.cache.set(name.cache_key(), edge_type.clone());
                Ok(Some(edge_type))
            }
            None => {
                tracing::warn!(name = %name, "edge type definition not found");
                Ok(None)
            }
        }
    }

    /// Resolve all eight canonical names, returning the ones still missing
    pub fn warm_up(&self) -> Result<Vec<EdgeTypeName>, StoreError> {
        let mut missing = Vec::new();
        for name in EdgeTypeName::ALL {
            if self.resolve(name)?.is_none() {
                missing.push(name);
            }
        }
        Ok(missing)
    }

    /// Drop every cached handle and resolve again
    pub fn refresh(&self) -> Result<Vec<EdgeTypeName>, StoreError> {
        self.clear();
        self.warm_up()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Whether a handle is cached, without touching the store
    pub fn is_cached(&self, name: EdgeTypeName) -> bool {
        self.cache.get(name.cache_key()).is_some()
    }
}
