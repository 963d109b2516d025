//! In-memory graph store backed by a petgraph `DiGraph`.
//!
//! Nodes are `NodeRef`s, edge weights carry type, site, attributes and write
//! time. Edge types registered with an inverse are mirrored: writing
//! `user -LIKE-> post` also writes `post -LIKED_BY-> user` with the same
//! attributes, and removing one removes both.

use crate::domain::edge::{Attributes, Edge, EdgeWrite, Neighbor};
use crate::domain::edge_type::{EdgeType, EdgeTypeId, EdgeTypeName};
use crate::domain::error::StoreError;
use crate::domain::node::{NodeRef, SiteId};
use crate::domain::ports::GraphStore;
use chrono::{DateTime, Utc};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Edge weight stored in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub edge_type: EdgeTypeId,
    pub site: SiteId,
    #[serde(default)]
    pub attributes: Attributes,
    pub time: DateTime<Utc>,
    /// Write sequence number; ranges list the most recent write first
    pub seq: u64,
}

/// Serializable form of the whole store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub edge_types: Vec<EdgeType>,
    pub edges: Vec<SnapshotEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub source: NodeRef,
    pub target: NodeRef,
    #[serde(flatten)]
    pub record: EdgeRecord,
}

#[derive(Default)]
struct GraphData {
    graph: DiGraph<NodeRef, EdgeRecord>,
    node_index: HashMap<NodeRef, NodeIndex>,
    edge_types: Vec<EdgeType>,
    next_seq: u64,
}

impl GraphData {
    fn node(&self, node: &NodeRef) -> Option<NodeIndex> {
        self.node_index.get(node).copied()
    }

    fn get_or_create_node(&mut self, node: &NodeRef) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(node) {
            return idx;
        }
        let idx = self.graph.add_node(node.clone());
        self.node_index.insert(node.clone(), idx);
        idx
    }

    fn edge_type_by_name(&self, name: &str) -> Option<&EdgeType> {
        self.edge_types.iter().find(|t| t.name == name)
    }

    fn edge_type_by_id(&self, id: EdgeTypeId) -> Option<&EdgeType> {
        self.edge_types.iter().find(|t| t.id == id)
    }

    /// Register `name` (and its inverse), linking the pair. Idempotent.
    fn register(&mut self, name: &str, inverse: Option<&str>) -> EdgeTypeId {
        let id = self.ensure_type(name);
        if let Some(inverse) = inverse {
            let inverse_id = self.ensure_type(inverse);
            self.link(id, inverse_id);
            self.link(inverse_id, id);
        }
        id
    }

    fn ensure_type(&mut self, name: &str) -> EdgeTypeId {
        if let Some(existing) = self.edge_type_by_name(name) {
            return existing.id;
        }
        let id = self.edge_types.len() as EdgeTypeId + 1;
        self.edge_types.push(EdgeType {
            id,
            name: name.to_string(),
            inverse: None,
        });
        id
    }

    fn link(&mut self, from: EdgeTypeId, to: EdgeTypeId) {
        if let Some(edge_type) = self.edge_types.iter_mut().find(|t| t.id == from) {
            edge_type.inverse = Some(to);
        }
    }

    fn find_edge(
        &self,
        source: NodeIndex,
        target: NodeIndex,
        edge_type: EdgeTypeId,
        site: SiteId,
    ) -> Option<EdgeIndex> {
        self.graph
            .edges(source)
            .find(|e| {
                e.target() == target && e.weight().edge_type == edge_type && e.weight().site == site
            })
            .map(|e| e.id())
    }

    /// Create or overwrite one directed edge; returns true when created
    fn upsert(
        &mut self,
        source: &NodeRef,
        target: &NodeRef,
        record: EdgeRecord,
    ) -> bool {
        let s = self.get_or_create_node(source);
        let t = self.get_or_create_node(target);
        match self.find_edge(s, t, record.edge_type, record.site) {
            Some(existing) => {
                self.graph[existing] = record;
                false
            }
            None => {
                self.graph.add_edge(s, t, record);
                true
            }
        }
    }

    fn delete(
        &mut self,
        source: &NodeRef,
        target: &NodeRef,
        edge_type: EdgeTypeId,
        site: SiteId,
    ) -> bool {
        let (Some(s), Some(t)) = (self.node(source), self.node(target)) else {
            return false;
        };
        match self.find_edge(s, t, edge_type, site) {
            // remove_edge may move another edge into this slot; indices are never held across calls
            Some(idx) => self.graph.remove_edge(idx).is_some(),
            None => false,
        }
    }

    fn outgoing<'a>(
        &'a self,
        node: &NodeRef,
        edge_type: EdgeTypeId,
        site: Option<SiteId>,
    ) -> impl Iterator<Item = (NodeIndex, &'a EdgeRecord)> + 'a {
        let start = self.node(node);
        start
            .into_iter()
            .flat_map(move |idx| self.graph.edges(idx))
            .filter(move |e| {
                e.weight().edge_type == edge_type && site.is_none_or(|s| e.weight().site == s)
            })
            .map(|e| (e.target(), e.weight()))
    }
}

/// In-memory `GraphStore` implementation
#[derive(Default)]
pub struct MemoryGraphStore {
    inner: RwLock<GraphData>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with the eight canonical edge types already defined
    pub fn bootstrapped() -> Self {
        let mut data = GraphData::default();
        register_canonical(&mut data);
        Self {
            inner: RwLock::new(data),
        }
    }

    /// Define the eight canonical edge types (idempotent)
    pub fn bootstrap(&self) -> Result<(), StoreError> {
        register_canonical(&mut *self.write()?);
        Ok(())
    }

    pub fn register_edge_type(
        &self,
        name: &str,
        inverse: Option<&str>,
    ) -> Result<EdgeTypeId, StoreError> {
        Ok(self.write()?.register(name, inverse))
    }

    pub fn edge_types(&self) -> Result<Vec<EdgeType>, StoreError> {
        Ok(self.read()?.edge_types.clone())
    }

    pub fn node_count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.graph.node_count())
    }

    /// Total stored edges, mirrored inverses included
    pub fn total_edges(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.graph.edge_count())
    }

    pub fn snapshot(&self) -> Result<GraphSnapshot, StoreError> {
        let data = self.read()?;
        let edges = data
            .graph
            .edge_references()
            .map(|e| SnapshotEdge {
                source: data.graph[e.source()].clone(),
                target: data.graph[e.target()].clone(),
                record: e.weight().clone(),
            })
            .collect();
        Ok(GraphSnapshot {
            edge_types: data.edge_types.clone(),
            edges,
        })
    }

    pub fn from_snapshot(snapshot: GraphSnapshot) -> Self {
        let mut data = GraphData {
            edge_types: snapshot.edge_types,
            ..GraphData::default()
        };
        for edge in snapshot.edges {
            data.next_seq = data.next_seq.max(edge.record.seq + 1);
            data.upsert(&edge.source, &edge.target, edge.record);
        }
        Self {
            inner: RwLock::new(data),
        }
    }

    /// Load a JSON snapshot; a missing file yields an empty store
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        let snapshot: GraphSnapshot = serde_json::from_str(&content)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.snapshot()?)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, GraphData>, StoreError> {
        self.inner.read().map_err(|_| StoreError::poisoned("graph"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, GraphData>, StoreError> {
        self.inner.write().map_err(|_| StoreError::poisoned("graph"))
    }
}

fn register_canonical(data: &mut GraphData) {
    for name in EdgeTypeName::ALL.into_iter().filter(|n| n.is_forward()) {
        data.register(name.as_str(), Some(name.inverse().as_str()));
    }
}

impl GraphStore for MemoryGraphStore {
    fn edge_type_lookup(&self, name: &str) -> Result<Option<EdgeType>, StoreError> {
        Ok(self.read()?.edge_type_by_name(name).cloned())
    }

    fn edge(
        &self,
        source: &NodeRef,
        target: &NodeRef,
        edge_type: &EdgeType,
        site: SiteId,
        attributes: Attributes,
    ) -> Result<Option<EdgeWrite>, StoreError> {
        let mut data = self.write()?;
        let Some(stored_type) = data.edge_type_by_id(edge_type.id).cloned() else {
            return Ok(None);
        };

        let time = Utc::now();
        let seq = data.next_seq;
        data.next_seq += 1;
        let record = EdgeRecord {
            edge_type: stored_type.id,
            site,
            attributes: attributes.clone(),
            time,
            seq,
        };
        let created = data.upsert(source, target, record.clone());
        if let Some(inverse) = stored_type.inverse {
            data.upsert(
                target,
                source,
                EdgeRecord {
                    edge_type: inverse,
                    ..record
                },
            );
        }

        Ok(Some(EdgeWrite {
            edge: Edge {
                source: source.clone(),
                target: target.clone(),
                edge_type: stored_type.id,
                site,
                attributes,
                time,
            },
            created,
        }))
    }

    fn no_edge(
        &self,
        source: &NodeRef,
        target: &NodeRef,
        edge_type: &EdgeType,
        site: SiteId,
    ) -> Result<bool, StoreError> {
        let mut data = self.write()?;
        let inverse = data.edge_type_by_id(edge_type.id).and_then(|t| t.inverse);
        let deleted = data.delete(source, target, edge_type.id, site);
        if let Some(inverse) = inverse.filter(|_| deleted) {
            data.delete(target, source, inverse, site);
        }
        Ok(deleted)
    }

    fn edge_get(
        &self,
        source: &NodeRef,
        target: &NodeRef,
        edge_type: &EdgeType,
        site: SiteId,
    ) -> Result<Option<Edge>, StoreError> {
        let data = self.read()?;
        let (Some(s), Some(t)) = (data.node(source), data.node(target)) else {
            return Ok(None);
        };
        Ok(data.find_edge(s, t, edge_type.id, site).map(|idx| {
            let record = &data.graph[idx];
            Edge {
                source: source.clone(),
                target: target.clone(),
                edge_type: record.edge_type,
                site: record.site,
                attributes: record.attributes.clone(),
                time: record.time,
            }
        }))
    }

    fn edge_count(
        &self,
        node: &NodeRef,
        edge_type: &EdgeType,
        site: Option<SiteId>,
    ) -> Result<usize, StoreError> {
        Ok(self.read()?.outgoing(node, edge_type.id, site).count())
    }

    /// Most recently written first
    fn edge_range(
        &self,
        node: &NodeRef,
        edge_type: &EdgeType,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Neighbor>, StoreError> {
        let data = self.read()?;
        let mut edges: Vec<_> = data.outgoing(node, edge_type.id, None).collect();
        edges.sort_by(|(_, a), (_, b)| b.seq.cmp(&a.seq));
        Ok(edges
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(idx, record)| Neighbor {
                node: data.graph[idx].clone(),
                attributes: record.attributes.clone(),
                time: record.time,
            })
            .collect())
    }
}
