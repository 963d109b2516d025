use crate::domain::edge_type::InteractionKind;
use crate::domain::event::InteractionEvent;
use crate::domain::node::Pk;
use serde::{Deserialize, Serialize};

/// Result of a like/favorite/denounce toggle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub result: bool,
    /// State after the toggle: true when the interaction is now present
    pub toggle_status: bool,
    pub counter: usize,
    pub counter_str: String,
}

impl ToggleResponse {
    pub fn failed() -> Self {
        Self {
            result: false,
            toggle_status: false,
            counter: 0,
            counter_str: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateResponse {
    pub result: bool,
    /// True when an earlier rating was overwritten
    pub modified: bool,
    pub rating: Option<f64>,
    pub comment: Option<String>,
    pub old_rating: Option<f64>,
    pub counter: usize,
}

impl RateResponse {
    pub fn failed() -> Self {
        Self {
            result: false,
            modified: false,
            rating: None,
            comment: None,
            old_rating: None,
            counter: 0,
        }
    }
}

/// Initial values of a rating form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingForm {
    pub rating: f64,
    pub comment: Option<String>,
}

/// What one actor did to one subject
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActorState {
    pub actor: String,
    pub liked: bool,
    pub favorite: bool,
    pub rating: Option<f64>,
    pub rating_comment: Option<String>,
    pub denounced: bool,
    pub denounce_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub subject: String,
    pub site: u32,
    pub likes: usize,
    pub favorite_marks: usize,
    pub ratings: usize,
    pub denounces: usize,
    pub actor: Option<ActorState>,
}

/// Reverse query result: subjects of one kind an actor interacted with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetsResponse {
    pub actor: String,
    pub interaction: InteractionKind,
    pub kind: String,
    pub pks: Vec<Pk>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeTypeStatus {
    pub name: String,
    pub cache_key: String,
    pub resolved: bool,
    pub id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeTypesResponse {
    pub edge_types: Vec<EdgeTypeStatus>,
}

/// CLI output envelope: the response plus the events the operation emitted.
/// `T` must serialize as a map.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<T: Serialize> {
    #[serde(flatten)]
    pub response: T,
    pub events: Vec<InteractionEvent>,
}
