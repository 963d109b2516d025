use crate::domain::edge::{Attributes, Edge, EdgeWrite, Neighbor};
use crate::domain::edge_type::EdgeType;
use crate::domain::error::StoreError;
use crate::domain::event::InteractionEvent;
use crate::domain::node::{Entity, NodeRef, Pk, SiteId};
use anyhow::Result;

/// Typed-edge graph store port (implemented by Infrastructure).
///
/// `Ok(None)`/`Ok(false)` are ordinary "nothing there" answers; `Err` is
/// reserved for the store itself failing.
pub trait GraphStore: Send + Sync {
    /// Look up an edge type definition by its canonical name
    fn edge_type_lookup(&self, name: &str) -> Result<Option<EdgeType>, StoreError>;

    /// Create the edge, or overwrite its attributes if it already exists.
    /// `Ok(None)` means the store rejected the write.
    fn edge(
        &self,
        source: &NodeRef,
        target: &NodeRef,
        edge_type: &EdgeType,
        site: SiteId,
        attributes: Attributes,
    ) -> Result<Option<EdgeWrite>, StoreError>;

    /// Delete the edge; true iff it existed
    fn no_edge(
        &self,
        source: &NodeRef,
        target: &NodeRef,
        edge_type: &EdgeType,
        site: SiteId,
    ) -> Result<bool, StoreError>;

    fn edge_get(
        &self,
        source: &NodeRef,
        target: &NodeRef,
        edge_type: &EdgeType,
        site: SiteId,
    ) -> Result<Option<Edge>, StoreError>;

    /// Outgoing edges of `edge_type` from `node`; `site = None` counts every site
    fn edge_count(
        &self,
        node: &NodeRef,
        edge_type: &EdgeType,
        site: Option<SiteId>,
    ) -> Result<usize, StoreError>;

    /// Page through outgoing edges of `edge_type` from `node`, across all sites
    fn edge_range(
        &self,
        node: &NodeRef,
        edge_type: &EdgeType,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Neighbor>, StoreError>;
}

/// Shared cache for resolved edge type handles
pub trait EdgeTypeCache: Send + Sync {
    fn get(&self, key: &str) -> Option<EdgeType>;
    fn set(&self, key: &str, value: EdgeType);
    fn clear(&self);
}

/// Resolves the site a subject belongs to when it carries none itself
pub trait SiteProvider: Send + Sync {
    fn current_site(&self) -> SiteId;
}

/// Receiver of interaction events.
///
/// Errors are logged by the caller and never fail the interaction.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &InteractionEvent) -> Result<()>;
}

/// Per-kind content store supporting one bulk fetch by primary key set
pub trait EntityCollection<E: Entity> {
    /// Fetch the instances whose pk is in `pks`; unknown pks are skipped
    fn filter_pks(&self, pks: &[Pk]) -> Result<Vec<E>>;
}
