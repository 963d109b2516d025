use crate::domain::edge_type::EdgeTypeId;
use crate::domain::node::{NodeRef, SiteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form attribute bag stored on an edge
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// A directed, typed, site-scoped edge as stored in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeRef,
    pub target: NodeRef,
    pub edge_type: EdgeTypeId,
    pub site: SiteId,
    #[serde(default)]
    pub attributes: Attributes,
    pub time: DateTime<Utc>,
}

impl Edge {
    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }

    /// Decode the attribute bag into a typed payload
    pub fn payload<P: for<'de> Deserialize<'de>>(&self) -> Option<P> {
        serde_json::from_value(serde_json::Value::Object(self.attributes.clone())).ok()
    }
}

/// Outcome of a create-or-overwrite write
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeWrite {
    pub edge: Edge,
    /// False when an edge of the same type already existed and was overwritten
    pub created: bool,
}

/// One entry of an outgoing-edge enumeration
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub node: NodeRef,
    pub attributes: Attributes,
    pub time: DateTime<Utc>,
}

/// Attribute payload of a RATE edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePayload {
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Attribute payload of a DENOUNCE edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenouncePayload {
    pub comment: String,
}

/// Serialize a payload into an attribute bag. Non-object payloads yield an empty bag.
pub fn to_attributes<P: Serialize>(payload: &P) -> Attributes {
    match serde_json::to_value(payload) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => Attributes::new(),
    }
}
