//! Reverse queries: "which posts did this user like?"
//!
//! The graph is kind-agnostic, so an actor's LIKE edges may point at posts,
//! videos and comments alike. The query runs in two phases: enumerate every
//! neighbor through the forward edge type, keep the ones of the requested
//! kind, then fetch the survivors from the kind's collection in one call.

use crate::domain::edge_type::InteractionKind;
use crate::domain::error::{InteractionError, Result};
use crate::domain::interaction::InteractionGraph;
use crate::domain::node::{Entity, NodeRef, Pk};
use crate::domain::ports::EntityCollection;
use std::collections::HashSet;

impl InteractionGraph {
    /// Primary keys of `kind` reachable from `actor` through the interaction's
    /// forward edge type, deduplicated, in store order.
    pub fn target_pks(
        &self,
        actor: &NodeRef,
        interaction: InteractionKind,
        kind: &str,
    ) -> Result<Vec<Pk>> {
        let forward = interaction.forward();
        let count = self.count_all(actor, forward)?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let page_size = self.range_page_size().unwrap_or(count);
        let mut seen = HashSet::new();
        let mut pks = Vec::new();
        let mut offset = 0;
        while offset < count {
            let page = self.range(actor, forward, offset, page_size)?;
            if page.is_empty() {
                break;
            }
            offset += page.len();
            for neighbor in page {
                if neighbor.node.is_kind(kind) && seen.insert(neighbor.node.pk) {
                    pks.push(neighbor.node.pk);
                }
            }
        }

        tracing::debug!(
            %actor,
            interaction = %interaction,
            kind,
            edges = count,
            matched = pks.len(),
            "reverse query"
        );
        Ok(pks)
    }

    /// Instances of `E` the actor reached through `interaction`, fetched in one batch
    pub fn targets_of_kind<E: Entity>(
        &self,
        actor: &NodeRef,
        interaction: InteractionKind,
        collection: &dyn EntityCollection<E>,
    ) -> Result<Vec<E>> {
        let pks = self.target_pks(actor, interaction, E::KIND)?;
        if pks.is_empty() {
            return Ok(Vec::new());
        }
        collection
            .filter_pks(&pks)
            .map_err(|source| InteractionError::Collection {
                kind: E::KIND.to_string(),
                source: source.into(),
            })
    }
}

/// Collections of likable content: "posts liked by this user"
pub trait LikableCollection<E: Entity>: EntityCollection<E> + Sized {
    fn liked_by<A: Entity>(&self, graph: &InteractionGraph, user: &A) -> Result<Vec<E>> {
        graph.targets_of_kind(&user.node_ref(), InteractionKind::Like, self)
    }
}

/// Collections of favoritable content
pub trait FavoriteCollection<E: Entity>: EntityCollection<E> + Sized {
    fn favorites<A: Entity>(&self, graph: &InteractionGraph, user: &A) -> Result<Vec<E>> {
        graph.targets_of_kind(&user.node_ref(), InteractionKind::Favorite, self)
    }
}

/// Collections of denounceable content
pub trait DenounceCollection<E: Entity>: EntityCollection<E> + Sized {
    fn denounced_by<A: Entity>(&self, graph: &InteractionGraph, user: &A) -> Result<Vec<E>> {
        graph.targets_of_kind(&user.node_ref(), InteractionKind::Denounce, self)
    }
}
