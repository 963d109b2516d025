//! Interaction Graph - the read/write protocol behind every interaction
//!
//! Each interaction kind owns a forward edge type (actor → subject) and a
//! reverse one (subject → actor). Writes go through the forward type; the
//! store mirrors them into the reverse type, which is what the subject-side
//! reads (`count`, `actor_state`, payload getters) use.
//!
//! An edge type that cannot be resolved makes the interaction unusable but
//! never raises: reads answer `0`/`false`/`None` and writes answer `None`.

use crate::domain::edge::{
    Attributes, DenouncePayload, Edge, EdgeWrite, Neighbor, RatePayload, to_attributes,
};
use crate::domain::edge_type::{EdgeType, EdgeTypeName, InteractionKind};
use crate::domain::error::Result;
use crate::domain::event::InteractionEvent;
use crate::domain::node::{Entity, NodeRef, SiteId};
use crate::domain::ports::{EventSink, GraphStore, SiteProvider};
use crate::domain::type_registry::EdgeTypeRegistry;
use std::sync::Arc;

/// What an `apply` call writes
#[derive(Debug, Clone, PartialEq)]
pub enum Apply {
    Like,
    Favorite,
    /// First rating (or an overwrite the caller does not treat as a change)
    Rate {
        rating: f64,
        comment: Option<String>,
    },
    /// Overwrite of an existing rating; `previous` is reported in the event
    ChangeRate {
        rating: f64,
        comment: Option<String>,
        previous: Option<f64>,
    },
    Denounce {
        comment: String,
    },
}

impl Apply {
    pub fn kind(&self) -> InteractionKind {
        match self {
            Apply::Like => InteractionKind::Like,
            Apply::Favorite => InteractionKind::Favorite,
            Apply::Rate { .. } | Apply::ChangeRate { .. } => InteractionKind::Rate,
            Apply::Denounce { .. } => InteractionKind::Denounce,
        }
    }

    fn attributes(&self) -> Attributes {
        match self {
            Apply::Like | Apply::Favorite => Attributes::new(),
            Apply::Rate { rating, comment } | Apply::ChangeRate { rating, comment, .. } => {
                to_attributes(&RatePayload {
                    rating: *rating,
                    comment: comment.clone(),
                })
            }
            Apply::Denounce { comment } => to_attributes(&DenouncePayload {
                comment: comment.clone(),
            }),
        }
    }
}

#[derive(Clone)]
pub struct InteractionGraph {
    store: Arc<dyn GraphStore>,
    registry: EdgeTypeRegistry,
    sites: Arc<dyn SiteProvider>,
    events: Arc<dyn EventSink>,
    range_page_size: Option<usize>,
}

impl InteractionGraph {
    pub fn new(
        store: Arc<dyn GraphStore>,
        registry: EdgeTypeRegistry,
        sites: Arc<dyn SiteProvider>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            store,
            registry,
            sites,
            events,
            range_page_size: None,
        }
    }

    /// Cap the size of a single `edge_range` call made by reverse queries
    pub fn with_range_page_size(mut self, page_size: Option<usize>) -> Self {
        self.range_page_size = page_size.filter(|&size| size > 0);
        self
    }

    pub fn registry(&self) -> &EdgeTypeRegistry {
        &self.registry
    }

    pub(crate) fn range_page_size(&self) -> Option<usize> {
        self.range_page_size
    }

    pub fn current_site(&self) -> SiteId {
        self.sites.current_site()
    }

    /// Site of an instance, falling back to the current site
    pub fn site_for<E: Entity + ?Sized>(&self, entity: &E) -> SiteId {
        entity.site().unwrap_or_else(|| self.sites.current_site())
    }

    pub(crate) fn edge_type(&self, name: EdgeTypeName) -> Result<Option<EdgeType>> {
        Ok(self.registry.resolve(name)?)
    }

    // -------------------------------------------------------------------------
    // Edge protocol
    // -------------------------------------------------------------------------

    pub fn exists(
        &self,
        source: &NodeRef,
        target: &NodeRef,
        name: EdgeTypeName,
        site: SiteId,
    ) -> Result<bool> {
        Ok(self.get(source, target, name, site)?.is_some())
    }

    pub fn get(
        &self,
        source: &NodeRef,
        target: &NodeRef,
        name: EdgeTypeName,
        site: SiteId,
    ) -> Result<Option<Edge>> {
        let Some(edge_type) = self.edge_type(name)? else {
            return Ok(None);
        };
        Ok(self.store.edge_get(source, target, &edge_type, site)?)
    }

    pub fn count(&self, node: &NodeRef, name: EdgeTypeName, site: SiteId) -> Result<usize> {
        let Some(edge_type) = self.edge_type(name)? else {
            return Ok(0);
        };
        Ok(self.store.edge_count(node, &edge_type, Some(site))?)
    }

    /// Like `count`, but across every site
    pub fn count_all(&self, node: &NodeRef, name: EdgeTypeName) -> Result<usize> {
        let Some(edge_type) = self.edge_type(name)? else {
            return Ok(0);
        };
        Ok(self.store.edge_count(node, &edge_type, None)?)
    }

    pub fn write(
        &self,
        source: &NodeRef,
        target: &NodeRef,
        name: EdgeTypeName,
        site: SiteId,
        attributes: Attributes,
    ) -> Result<Option<EdgeWrite>> {
        let Some(edge_type) = self.edge_type(name)? else {
            return Ok(None);
        };
        let written = self
            .store
            .edge(source, target, &edge_type, site, attributes)?;
        if written.is_none() {
            tracing::warn!(%source, %target, edge_type = %name, "store rejected edge write");
        }
        Ok(written)
    }

    pub fn remove(
        &self,
        source: &NodeRef,
        target: &NodeRef,
        name: EdgeTypeName,
        site: SiteId,
    ) -> Result<bool> {
        let Some(edge_type) = self.edge_type(name)? else {
            return Ok(false);
        };
        Ok(self.store.no_edge(source, target, &edge_type, site)?)
    }

    pub fn range(
        &self,
        node: &NodeRef,
        name: EdgeTypeName,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Neighbor>> {
        let Some(edge_type) = self.edge_type(name)? else {
            return Ok(Vec::new());
        };
        Ok(self.store.edge_range(node, &edge_type, offset, limit)?)
    }

    // -------------------------------------------------------------------------
    // Interaction operations (subject = content, actor = user)
    // -------------------------------------------------------------------------

    /// How many actors point at `subject` through this interaction
    pub fn interaction_count(
        &self,
        kind: InteractionKind,
        subject: &NodeRef,
        site: SiteId,
    ) -> Result<usize> {
        self.count(subject, kind.reverse(), site)
    }

    /// Whether `actor` currently holds this interaction on `subject`
    pub fn actor_state(
        &self,
        kind: InteractionKind,
        subject: &NodeRef,
        actor: &NodeRef,
        site: SiteId,
    ) -> Result<bool> {
        self.exists(subject, actor, kind.reverse(), site)
    }

    /// Write the forward edge and emit the matching event.
    ///
    /// Toggle interactions only emit when the edge was newly created, so a
    /// repeated like is a silent overwrite. Ratings emit on every write; a
    /// change reports the `previous` rating the caller read.
    pub fn apply(
        &self,
        subject: &NodeRef,
        actor: &NodeRef,
        site: SiteId,
        action: Apply,
    ) -> Result<Option<EdgeWrite>> {
        let kind = action.kind();
        let Some(written) =
            self.write(actor, subject, kind.forward(), site, action.attributes())?
        else {
            return Ok(None);
        };

        let subject = subject.clone();
        let actor = actor.clone();
        let event = match action {
            Apply::Like => written
                .created
                .then_some(InteractionEvent::Liked { subject, actor }),
            Apply::Favorite => written
                .created
                .then_some(InteractionEvent::MarkedAsFavorite { subject, actor }),
            Apply::Denounce { comment } => written.created.then_some(InteractionEvent::Denounced {
                subject,
                actor,
                comment,
            }),
            Apply::Rate { rating, comment } => Some(InteractionEvent::Rated {
                subject,
                actor,
                rating,
                comment,
            }),
            Apply::ChangeRate {
                rating,
                comment,
                previous,
            } => Some(InteractionEvent::RateModified {
                subject,
                actor,
                old_rating: previous,
                rating,
                comment,
            }),
        };
        if let Some(event) = event {
            self.emit(event);
        }
        Ok(Some(written))
    }

    /// Delete the forward edge; emits the state-left event when one existed.
    ///
    /// Ratings have no state-left event, so removing one is silent.
    pub fn retract(
        &self,
        kind: InteractionKind,
        subject: &NodeRef,
        actor: &NodeRef,
        site: SiteId,
    ) -> Result<bool> {
        let deleted = self.remove(actor, subject, kind.forward(), site)?;
        if deleted {
            let subject = subject.clone();
            let actor = actor.clone();
            let event = match kind {
                InteractionKind::Like => Some(InteractionEvent::Disliked { subject, actor }),
                InteractionKind::Favorite => {
                    Some(InteractionEvent::UnmarkedAsFavorite { subject, actor })
                }
                InteractionKind::Denounce => {
                    Some(InteractionEvent::DenounceRemoved { subject, actor })
                }
                InteractionKind::Rate => None,
            };
            if let Some(event) = event {
                self.emit(event);
            }
        }
        Ok(deleted)
    }

    pub fn rating(&self, subject: &NodeRef, actor: &NodeRef, site: SiteId) -> Result<Option<f64>> {
        Ok(self.rate_payload(subject, actor, site)?.map(|p| p.rating))
    }

    /// `(rating, comment)`, or `(None, None)` when the actor never rated
    pub fn full_rating(
        &self,
        subject: &NodeRef,
        actor: &NodeRef,
        site: SiteId,
    ) -> Result<(Option<f64>, Option<String>)> {
        Ok(match self.rate_payload(subject, actor, site)? {
            Some(payload) => (Some(payload.rating), payload.comment),
            None => (None, None),
        })
    }

    pub fn denounce_comment(
        &self,
        subject: &NodeRef,
        actor: &NodeRef,
        site: SiteId,
    ) -> Result<Option<String>> {
        let edge = self.get(subject, actor, EdgeTypeName::DenouncedBy, site)?;
        Ok(edge
            .and_then(|e| e.payload::<DenouncePayload>())
            .map(|p| p.comment))
    }

    fn rate_payload(
        &self,
        subject: &NodeRef,
        actor: &NodeRef,
        site: SiteId,
    ) -> Result<Option<RatePayload>> {
        let edge = self.get(subject, actor, EdgeTypeName::RatedBy, site)?;
        Ok(edge.and_then(|e| e.payload::<RatePayload>()))
    }

    fn emit(&self, event: InteractionEvent) {
        if let Err(e) = self.events.emit(&event) {
            tracing::warn!(event = event.name(), error = %e, "event sink failed");
        }
    }
}
