//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use content_interactions::adapters::memory::MemoryGraphStore;
use content_interactions::domain::edge::{Attributes, Edge, EdgeWrite, Neighbor};
use content_interactions::domain::edge_type::EdgeType;
use content_interactions::domain::error::StoreError;
use content_interactions::domain::event::InteractionEvent;
use content_interactions::domain::node::{NodeRef, SiteId};
use content_interactions::domain::ports::{EventSink, GraphStore};

/// GraphStore wrapper that counts calls and can simulate an outage.
pub struct CountingGraphStore {
    pub inner: MemoryGraphStore,
    pub lookups: AtomicUsize,
    pub counts: AtomicUsize,
    pub ranges: AtomicUsize,
    pub writes: AtomicUsize,
    pub gets: AtomicUsize,
    offline: AtomicBool,
}

impl CountingGraphStore {
    pub fn new(inner: MemoryGraphStore) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
            counts: AtomicUsize::new(0),
            ranges: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            gets: AtomicUsize::new(0),
            offline: AtomicBool::new(false),
        }
    }

    pub fn bootstrapped() -> Self {
        Self::new(MemoryGraphStore::bootstrapped())
    }

    pub fn empty() -> Self {
        Self::new(MemoryGraphStore::new())
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn ranges(&self) -> usize {
        self.ranges.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::connection("store offline"))
        } else {
            Ok(())
        }
    }
}

impl GraphStore for CountingGraphStore {
    fn edge_type_lookup(&self, name: &str) -> Result<Option<EdgeType>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.edge_type_lookup(name)
    }

    fn edge(
        &self,
        source: &NodeRef,
        target: &NodeRef,
        edge_type: &EdgeType,
        site: SiteId,
        attributes: Attributes,
    ) -> Result<Option<EdgeWrite>, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.edge(source, target, edge_type, site, attributes)
    }

    fn no_edge(
        &self,
        source: &NodeRef,
        target: &NodeRef,
        edge_type: &EdgeType,
        site: SiteId,
    ) -> Result<bool, StoreError> {
        self.check()?;
        self.inner.no_edge(source, target, edge_type, site)
    }

    fn edge_get(
        &self,
        source: &NodeRef,
        target: &NodeRef,
        edge_type: &EdgeType,
        site: SiteId,
    ) -> Result<Option<Edge>, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.edge_get(source, target, edge_type, site)
    }

    fn edge_count(
        &self,
        node: &NodeRef,
        edge_type: &EdgeType,
        site: Option<SiteId>,
    ) -> Result<usize, StoreError> {
        self.counts.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.edge_count(node, edge_type, site)
    }

    fn edge_range(
        &self,
        node: &NodeRef,
        edge_type: &EdgeType,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Neighbor>, StoreError> {
        self.ranges.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.edge_range(node, edge_type, offset, limit)
    }
}

/// Event sink that always fails.
pub struct FailingSink {
    pub attempts: AtomicUsize,
}

impl FailingSink {
    pub fn new() -> Self {
        Self {
            attempts: AtomicUsize::new(0),
        }
    }
}

impl Default for FailingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for FailingSink {
    fn emit(&self, _event: &InteractionEvent) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(anyhow!("subscriber exploded"))
    }
}
