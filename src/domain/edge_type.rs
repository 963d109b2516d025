//! Edge type names and handles.
//!
//! Interactions are stored as typed edges. Every interaction owns two edge
//! types: a forward one pointing from the actor to the subject and a reverse
//! one pointing back. The store keeps the pair in sync, so "who liked this
//! post" is an outgoing-edge query on the post.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backing-store identifier of an edge type definition
pub type EdgeTypeId = u32;

/// The eight canonical edge type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeTypeName {
    Like,
    LikedBy,
    Favorite,
    FavoriteOf,
    Rate,
    RatedBy,
    Denounce,
    DenouncedBy,
}

impl EdgeTypeName {
    pub const ALL: [EdgeTypeName; 8] = [
        EdgeTypeName::Like,
        EdgeTypeName::LikedBy,
        EdgeTypeName::Favorite,
        EdgeTypeName::FavoriteOf,
        EdgeTypeName::Rate,
        EdgeTypeName::RatedBy,
        EdgeTypeName::Denounce,
        EdgeTypeName::DenouncedBy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeTypeName::Like => "like",
            EdgeTypeName::LikedBy => "liked_by",
            EdgeTypeName::Favorite => "favorite",
            EdgeTypeName::FavoriteOf => "favorite_of",
            EdgeTypeName::Rate => "rate",
            EdgeTypeName::RatedBy => "rated_by",
            EdgeTypeName::Denounce => "denounce",
            EdgeTypeName::DenouncedBy => "denounced_by",
        }
    }

    /// Key under which the resolved handle is cached
    pub fn cache_key(&self) -> &'static str {
        match self {
            EdgeTypeName::Like => "LIKE_EDGE_TYPE",
            EdgeTypeName::LikedBy => "LIKED_BY_EDGE_TYPE",
            EdgeTypeName::Favorite => "FAVORITE_EDGE_TYPE",
            EdgeTypeName::FavoriteOf => "FAVORITE_OF_EDGE_TYPE",
            EdgeTypeName::Rate => "RATE_EDGE_TYPE",
            EdgeTypeName::RatedBy => "RATED_BY_EDGE_TYPE",
            EdgeTypeName::Denounce => "DENOUNCE_EDGE_TYPE",
            EdgeTypeName::DenouncedBy => "DENOUNCED_BY_EDGE_TYPE",
        }
    }

    /// The complementary name of the pair
    pub fn inverse(&self) -> EdgeTypeName {
        match self {
            EdgeTypeName::Like => EdgeTypeName::LikedBy,
            EdgeTypeName::LikedBy => EdgeTypeName::Like,
            EdgeTypeName::Favorite => EdgeTypeName::FavoriteOf,
            EdgeTypeName::FavoriteOf => EdgeTypeName::Favorite,
            EdgeTypeName::Rate => EdgeTypeName::RatedBy,
            EdgeTypeName::RatedBy => EdgeTypeName::Rate,
            EdgeTypeName::Denounce => EdgeTypeName::DenouncedBy,
            EdgeTypeName::DenouncedBy => EdgeTypeName::Denounce,
        }
    }

    pub fn is_forward(&self) -> bool {
        matches!(
            self,
            EdgeTypeName::Like
                | EdgeTypeName::Favorite
                | EdgeTypeName::Rate
                | EdgeTypeName::Denounce
        )
    }
}

impl fmt::Display for EdgeTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeTypeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EdgeTypeName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("unknown edge type: {s}"))
    }
}

/// Resolved edge type handle, as handed out by the graph store.
///
/// Handles are immutable once resolved, which is what makes it safe to cache
/// them without invalidation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeType {
    pub id: EdgeTypeId,
    pub name: String,
    /// Id of the complementary type the store mirrors writes into
    pub inverse: Option<EdgeTypeId>,
}

/// The four interaction kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Like,
    Favorite,
    Rate,
    Denounce,
}

impl InteractionKind {
    /// Actor → subject
    pub fn forward(&self) -> EdgeTypeName {
        match self {
            InteractionKind::Like => EdgeTypeName::Like,
            InteractionKind::Favorite => EdgeTypeName::Favorite,
            InteractionKind::Rate => EdgeTypeName::Rate,
            InteractionKind::Denounce => EdgeTypeName::Denounce,
        }
    }

    /// Subject → actor
    pub fn reverse(&self) -> EdgeTypeName {
        self.forward().inverse()
    }

    /// Whether the calling surface alternates between apply and retract
    pub fn is_toggle(&self) -> bool {
        !matches!(self, InteractionKind::Rate)
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.forward().as_str())
    }
}
