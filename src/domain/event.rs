use crate::domain::edge_type::InteractionKind;
use crate::domain::node::NodeRef;
use serde::{Deserialize, Serialize};

/// Domain events emitted after an interaction edge was written or removed.
///
/// `subject` is the content the interaction targets, `actor` the user who
/// performed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InteractionEvent {
    Liked {
        subject: NodeRef,
        actor: NodeRef,
    },
    Disliked {
        subject: NodeRef,
        actor: NodeRef,
    },
    MarkedAsFavorite {
        subject: NodeRef,
        actor: NodeRef,
    },
    UnmarkedAsFavorite {
        subject: NodeRef,
        actor: NodeRef,
    },
    Rated {
        subject: NodeRef,
        actor: NodeRef,
        rating: f64,
        comment: Option<String>,
    },
    RateModified {
        subject: NodeRef,
        actor: NodeRef,
        /// Absent when the actor had no previous rating
        old_rating: Option<f64>,
        rating: f64,
        comment: Option<String>,
    },
    Denounced {
        subject: NodeRef,
        actor: NodeRef,
        comment: String,
    },
    DenounceRemoved {
        subject: NodeRef,
        actor: NodeRef,
    },
}

impl InteractionEvent {
    pub fn subject(&self) -> &NodeRef {
        match self {
            InteractionEvent::Liked { subject, .. }
            | InteractionEvent::Disliked { subject, .. }
            | InteractionEvent::MarkedAsFavorite { subject, .. }
            | InteractionEvent::UnmarkedAsFavorite { subject, .. }
            | InteractionEvent::Rated { subject, .. }
            | InteractionEvent::RateModified { subject, .. }
            | InteractionEvent::Denounced { subject, .. }
            | InteractionEvent::DenounceRemoved { subject, .. } => subject,
        }
    }

    pub fn actor(&self) -> &NodeRef {
        match self {
            InteractionEvent::Liked { actor, .. }
            | InteractionEvent::Disliked { actor, .. }
            | InteractionEvent::MarkedAsFavorite { actor, .. }
            | InteractionEvent::UnmarkedAsFavorite { actor, .. }
            | InteractionEvent::Rated { actor, .. }
            | InteractionEvent::RateModified { actor, .. }
            | InteractionEvent::Denounced { actor, .. }
            | InteractionEvent::DenounceRemoved { actor, .. } => actor,
        }
    }

    pub fn interaction(&self) -> InteractionKind {
        match self {
            InteractionEvent::Liked { .. } | InteractionEvent::Disliked { .. } => {
                InteractionKind::Like
            }
            InteractionEvent::MarkedAsFavorite { .. }
            | InteractionEvent::UnmarkedAsFavorite { .. } => InteractionKind::Favorite,
            InteractionEvent::Rated { .. } | InteractionEvent::RateModified { .. } => {
                InteractionKind::Rate
            }
            InteractionEvent::Denounced { .. } | InteractionEvent::DenounceRemoved { .. } => {
                InteractionKind::Denounce
            }
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            InteractionEvent::Liked { .. } => "item_liked",
            InteractionEvent::Disliked { .. } => "item_disliked",
            InteractionEvent::MarkedAsFavorite { .. } => "item_marked_as_favorite",
            InteractionEvent::UnmarkedAsFavorite { .. } => "item_unmarked_as_favorite",
            InteractionEvent::Rated { .. } => "item_rated",
            InteractionEvent::RateModified { .. } => "item_rate_modified",
            InteractionEvent::Denounced { .. } => "item_denounced",
            InteractionEvent::DenounceRemoved { .. } => "item_denounce_removed",
        }
    }
}
