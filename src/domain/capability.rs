//! Interaction capabilities for content entities.
//!
//! A content type opts in by implementing the marker trait:
//!
//! ```rust,ignore
//! impl Likable for Post {}
//! impl Rateable for Post {}
//!
//! post.like(&graph, &user)?;
//! assert!(post.liked_by(&graph, &user)?);
//! ```
//!
//! The capabilities only expose the primitives. Toggling (checking the state
//! first, then liking or unliking) is left to the calling layer.

use crate::domain::edge::EdgeWrite;
use crate::domain::edge_type::InteractionKind;
use crate::domain::error::Result;
use crate::domain::interaction::{Apply, InteractionGraph};
use crate::domain::node::Entity;

pub trait Likable: Entity + Sized {
    fn likes(&self, graph: &InteractionGraph) -> Result<usize> {
        graph.interaction_count(InteractionKind::Like, &self.node_ref(), graph.site_for(self))
    }

    fn liked_by<A: Entity>(&self, graph: &InteractionGraph, user: &A) -> Result<bool> {
        graph.actor_state(
            InteractionKind::Like,
            &self.node_ref(),
            &user.node_ref(),
            graph.site_for(self),
        )
    }

    fn like<A: Entity>(&self, graph: &InteractionGraph, user: &A) -> Result<Option<EdgeWrite>> {
        graph.apply(
            &self.node_ref(),
            &user.node_ref(),
            graph.site_for(self),
            Apply::Like,
        )
    }

    fn unlike<A: Entity>(&self, graph: &InteractionGraph, user: &A) -> Result<bool> {
        graph.retract(
            InteractionKind::Like,
            &self.node_ref(),
            &user.node_ref(),
            graph.site_for(self),
        )
    }
}

pub trait Favoritable: Entity + Sized {
    fn favorite_marks(&self, graph: &InteractionGraph) -> Result<usize> {
        graph.interaction_count(
            InteractionKind::Favorite,
            &self.node_ref(),
            graph.site_for(self),
        )
    }

    fn favorite_of<A: Entity>(&self, graph: &InteractionGraph, user: &A) -> Result<bool> {
        graph.actor_state(
            InteractionKind::Favorite,
            &self.node_ref(),
            &user.node_ref(),
            graph.site_for(self),
        )
    }

    fn mark_as_favorite<A: Entity>(
        &self,
        graph: &InteractionGraph,
        user: &A,
    ) -> Result<Option<EdgeWrite>> {
        graph.apply(
            &self.node_ref(),
            &user.node_ref(),
            graph.site_for(self),
            Apply::Favorite,
        )
    }

    fn delete_favorite<A: Entity>(&self, graph: &InteractionGraph, user: &A) -> Result<bool> {
        graph.retract(
            InteractionKind::Favorite,
            &self.node_ref(),
            &user.node_ref(),
            graph.site_for(self),
        )
    }
}

pub trait Rateable: Entity + Sized {
    /// Number of actors that rated this item
    fn ratings(&self, graph: &InteractionGraph) -> Result<usize> {
        graph.interaction_count(InteractionKind::Rate, &self.node_ref(), graph.site_for(self))
    }

    fn rated_by<A: Entity>(&self, graph: &InteractionGraph, user: &A) -> Result<bool> {
        graph.actor_state(
            InteractionKind::Rate,
            &self.node_ref(),
            &user.node_ref(),
            graph.site_for(self),
        )
    }

    fn rating<A: Entity>(&self, graph: &InteractionGraph, user: &A) -> Result<Option<f64>> {
        graph.rating(&self.node_ref(), &user.node_ref(), graph.site_for(self))
    }

    fn full_rating<A: Entity>(
        &self,
        graph: &InteractionGraph,
        user: &A,
    ) -> Result<(Option<f64>, Option<String>)> {
        graph.full_rating(&self.node_ref(), &user.node_ref(), graph.site_for(self))
    }

    fn save_rate<A: Entity>(
        &self,
        graph: &InteractionGraph,
        user: &A,
        rating: f64,
        comment: Option<String>,
    ) -> Result<Option<EdgeWrite>> {
        graph.apply(
            &self.node_ref(),
            &user.node_ref(),
            graph.site_for(self),
            Apply::Rate { rating, comment },
        )
    }

    /// Overwrite the actor's rating; the previous one (if any) goes into the event
    fn change_rate<A: Entity>(
        &self,
        graph: &InteractionGraph,
        user: &A,
        rating: f64,
        comment: Option<String>,
    ) -> Result<Option<EdgeWrite>> {
        let (subject, actor, site) = (self.node_ref(), user.node_ref(), graph.site_for(self));
        let previous = graph.rating(&subject, &actor, site)?;
        graph.apply(
            &subject,
            &actor,
            site,
            Apply::ChangeRate {
                rating,
                comment,
                previous,
            },
        )
    }
}

pub trait Denounceable: Entity + Sized {
    fn denounces(&self, graph: &InteractionGraph) -> Result<usize> {
        graph.interaction_count(
            InteractionKind::Denounce,
            &self.node_ref(),
            graph.site_for(self),
        )
    }

    fn denounced_by<A: Entity>(&self, graph: &InteractionGraph, user: &A) -> Result<bool> {
        graph.actor_state(
            InteractionKind::Denounce,
            &self.node_ref(),
            &user.node_ref(),
            graph.site_for(self),
        )
    }

    fn denounce_comment<A: Entity>(
        &self,
        graph: &InteractionGraph,
        user: &A,
    ) -> Result<Option<String>> {
        graph.denounce_comment(&self.node_ref(), &user.node_ref(), graph.site_for(self))
    }

    fn denounce<A: Entity>(
        &self,
        graph: &InteractionGraph,
        user: &A,
        comment: impl Into<String>,
    ) -> Result<Option<EdgeWrite>> {
        graph.apply(
            &self.node_ref(),
            &user.node_ref(),
            graph.site_for(self),
            Apply::Denounce {
                comment: comment.into(),
            },
        )
    }

    fn remove_denounce<A: Entity>(&self, graph: &InteractionGraph, user: &A) -> Result<bool> {
        graph.retract(
            InteractionKind::Denounce,
            &self.node_ref(),
            &user.node_ref(),
            graph.site_for(self),
        )
    }
}
