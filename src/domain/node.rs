use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary key of a content entity or actor
pub type Pk = u64;

/// Site scope identifier (deployment/tenant partition)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteId(pub u32);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entity kind identifier, e.g. `blog.post` or `auth.user`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKind(String);

impl EntityKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for EntityKind {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Identity of a graph node: (entity kind, primary key).
///
/// The graph is kind-agnostic, so two entities only collide when both the kind
/// and the primary key match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef {
    pub kind: EntityKind,
    pub pk: Pk,
}

impl NodeRef {
    pub fn new(kind: impl Into<String>, pk: Pk) -> Self {
        Self {
            kind: EntityKind::new(kind),
            pk,
        }
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == *kind
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.pk)
    }
}

impl FromStr for NodeRef {
    type Err = String;

    /// Parses the `kind:pk` notation used by the CLI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, pk) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected kind:pk, got '{s}'"))?;
        if kind.is_empty() {
            return Err(format!("missing entity kind in '{s}'"));
        }
        let pk = pk
            .parse::<Pk>()
            .map_err(|e| format!("invalid primary key in '{s}': {e}"))?;
        Ok(Self::new(kind, pk))
    }
}

/// Anything that can be referenced as a graph node.
///
/// Content types and actors both implement this; the interaction capabilities
/// in [`crate::domain::capability`] build on it.
pub trait Entity {
    /// Kind identifier shared by every instance of the implementing type
    const KIND: &'static str;

    fn pk(&self) -> Pk;

    /// Explicit site of this instance; `None` falls back to the current site
    fn site(&self) -> Option<SiteId> {
        None
    }

    fn node_ref(&self) -> NodeRef {
        NodeRef::new(Self::KIND, self.pk())
    }
}
