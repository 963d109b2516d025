use crate::adapters::cache::SharedEdgeTypeCache;
use crate::adapters::site::CurrentSite;
use crate::app::config::InteractionConfig;
use crate::app::dto::*;
use crate::domain::edge_type::{EdgeTypeName, InteractionKind};
use crate::domain::interaction::{Apply, InteractionGraph};
use crate::domain::node::NodeRef;
use crate::domain::ports::{EventSink, GraphStore};
use crate::domain::type_registry::EdgeTypeRegistry;
use anyhow::{Result, anyhow, bail};
use std::sync::Arc;

/// Calling surface over the interaction graph.
///
/// Owns the toggle decision (check state, then apply or retract) and turns
/// every failure into a `result: false` response plus an error log.
#[derive(Clone)]
pub struct InteractionService {
    graph: InteractionGraph,
}

impl InteractionService {
    pub fn new(graph: InteractionGraph) -> Self {
        Self { graph }
    }

    /// Wire a graph from configuration with a fresh edge type cache
    pub fn from_config(
        config: &InteractionConfig,
        store: Arc<dyn GraphStore>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let registry = EdgeTypeRegistry::new(store.clone(), Arc::new(SharedEdgeTypeCache::new()));
        let sites = Arc::new(CurrentSite::new(config.current_site));
        let graph = InteractionGraph::new(store, registry, sites, events)
            .with_range_page_size(config.range_page_size);
        Self::new(graph)
    }

    pub fn graph(&self) -> &InteractionGraph {
        &self.graph
    }

    pub fn toggle_like(&self, subject: &NodeRef, actor: &NodeRef) -> ToggleResponse {
        self.toggle(InteractionKind::Like, subject, actor, None)
    }

    pub fn toggle_favorite(&self, subject: &NodeRef, actor: &NodeRef) -> ToggleResponse {
        self.toggle(InteractionKind::Favorite, subject, actor, None)
    }

    /// Denounce, or withdraw an existing denounce. A new denounce needs a comment.
    pub fn toggle_denounce(
        &self,
        subject: &NodeRef,
        actor: &NodeRef,
        comment: Option<String>,
    ) -> ToggleResponse {
        self.toggle(InteractionKind::Denounce, subject, actor, comment)
    }

    fn toggle(
        &self,
        kind: InteractionKind,
        subject: &NodeRef,
        actor: &NodeRef,
        comment: Option<String>,
    ) -> ToggleResponse {
        match self.try_toggle(kind, subject, actor, comment) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(interaction = %kind, %subject, %actor, error = %e, "toggle failed");
                ToggleResponse::failed()
            }
        }
    }

    fn try_toggle(
        &self,
        kind: InteractionKind,
        subject: &NodeRef,
        actor: &NodeRef,
        comment: Option<String>,
    ) -> Result<ToggleResponse> {
        let site = self.graph.current_site();
        let present = self.graph.actor_state(kind, subject, actor, site)?;

        let (done, toggle_status) = if present {
            (self.graph.retract(kind, subject, actor, site)?, false)
        } else {
            let action = match kind {
                InteractionKind::Like => Apply::Like,
                InteractionKind::Favorite => Apply::Favorite,
                InteractionKind::Denounce => Apply::Denounce {
                    comment: comment
                        .filter(|c| !c.trim().is_empty())
                        .ok_or_else(|| anyhow!("a comment is required to denounce"))?,
                },
                InteractionKind::Rate => bail!("rate is not a toggle interaction"),
            };
            (self.graph.apply(subject, actor, site, action)?.is_some(), true)
        };
        if !done {
            bail!("{kind} edge was not written; is the edge type defined?");
        }

        let counter = self.graph.interaction_count(kind, subject, site)?;
        Ok(ToggleResponse {
            result: true,
            toggle_status,
            counter,
            counter_str: compact_count(counter),
        })
    }

    /// Save a first rating or change an existing one
    pub fn rate(
        &self,
        subject: &NodeRef,
        actor: &NodeRef,
        rating: f64,
        comment: Option<String>,
    ) -> RateResponse {
        match self.try_rate(subject, actor, rating, comment) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(%subject, %actor, error = %e, "rating failed");
                RateResponse::failed()
            }
        }
    }

    fn try_rate(
        &self,
        subject: &NodeRef,
        actor: &NodeRef,
        rating: f64,
        comment: Option<String>,
    ) -> Result<RateResponse> {
        if !rating.is_finite() {
            bail!("rating must be a finite number, got {rating}");
        }
        let site = self.graph.current_site();
        let old_rating = self.graph.rating(subject, actor, site)?;
        let modified = old_rating.is_some();
        let action = if modified {
            Apply::ChangeRate {
                rating,
                comment: comment.clone(),
                previous: old_rating,
            }
        } else {
            Apply::Rate {
                rating,
                comment: comment.clone(),
            }
        };
        if self.graph.apply(subject, actor, site, action)?.is_none() {
            bail!("rate edge was not written; is the edge type defined?");
        }

        Ok(RateResponse {
            result: true,
            modified,
            rating: Some(rating),
            comment,
            old_rating,
            counter: self
                .graph
                .interaction_count(InteractionKind::Rate, subject, site)?,
        })
    }

    /// Prefill for a rating form: the actor's current rating, or `min_rate`
    pub fn rating_form(&self, subject: &NodeRef, actor: &NodeRef, min_rate: f64) -> Result<RatingForm> {
        let site = self.graph.current_site();
        Ok(match self.graph.full_rating(subject, actor, site)? {
            (Some(rating), comment) => RatingForm { rating, comment },
            (None, _) => RatingForm {
                rating: min_rate,
                comment: None,
            },
        })
    }

    pub fn summary(&self, subject: &NodeRef, actor: Option<&NodeRef>) -> Result<SummaryResponse> {
        let site = self.graph.current_site();
        let count = |kind| self.graph.interaction_count(kind, subject, site);

        let actor = match actor {
            Some(actor) => {
                let (rating, rating_comment) = self.graph.full_rating(subject, actor, site)?;
                Some(ActorState {
                    actor: actor.to_string(),
                    liked: self
                        .graph
                        .actor_state(InteractionKind::Like, subject, actor, site)?,
                    favorite: self
                        .graph
                        .actor_state(InteractionKind::Favorite, subject, actor, site)?,
                    rating,
                    rating_comment,
                    denounced: self
                        .graph
                        .actor_state(InteractionKind::Denounce, subject, actor, site)?,
                    denounce_comment: self.graph.denounce_comment(subject, actor, site)?,
                })
            }
            None => None,
        };

        Ok(SummaryResponse {
            subject: subject.to_string(),
            site: site.0,
            likes: count(InteractionKind::Like)?,
            favorite_marks: count(InteractionKind::Favorite)?,
            ratings: count(InteractionKind::Rate)?,
            denounces: count(InteractionKind::Denounce)?,
            actor,
        })
    }

    /// Subjects of `kind` the actor reached through `interaction`
    pub fn targets(
        &self,
        actor: &NodeRef,
        interaction: InteractionKind,
        kind: &str,
    ) -> Result<TargetsResponse> {
        Ok(TargetsResponse {
            actor: actor.to_string(),
            interaction,
            kind: kind.to_string(),
            pks: self.graph.target_pks(actor, interaction, kind)?,
        })
    }

    pub fn liked(&self, actor: &NodeRef, kind: &str) -> Result<TargetsResponse> {
        self.targets(actor, InteractionKind::Like, kind)
    }

    pub fn favorites(&self, actor: &NodeRef, kind: &str) -> Result<TargetsResponse> {
        self.targets(actor, InteractionKind::Favorite, kind)
    }

    pub fn denounced(&self, actor: &NodeRef, kind: &str) -> Result<TargetsResponse> {
        self.targets(actor, InteractionKind::Denounce, kind)
    }

    /// Resolution state of every canonical edge type
    pub fn edge_types(&self) -> Result<EdgeTypesResponse> {
        let registry = self.graph.registry();
        let edge_types = EdgeTypeName::ALL
            .into_iter()
            .map(|name| {
                let resolved = registry.resolve(name)?;
                Ok(EdgeTypeStatus {
                    name: name.as_str().to_string(),
                    cache_key: name.cache_key().to_string(),
                    resolved: resolved.is_some(),
                    id: resolved.map(|t| t.id),
                })
            })
            .collect::<Result<_>>()?;
        Ok(EdgeTypesResponse { edge_types })
    }
}

/// Compact counter label: `999`, `1k`, `1.2k`, `3.4M`, `2G`
pub fn compact_count(n: usize) -> String {
    const UNITS: [(usize, &str); 3] = [(1_000_000_000, "G"), (1_000_000, "M"), (1_000, "k")];
    for (scale, suffix) in UNITS {
        if n >= scale {
            let whole = n / scale;
            let tenth = (n % scale) / (scale / 10);
            return if tenth == 0 {
                format!("{whole}{suffix}")
            } else {
                format!("{whole}.{tenth}{suffix}")
            };
        }
    }
    n.to_string()
}
