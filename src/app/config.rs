use crate::domain::node::SiteId;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration, loaded from a JSON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Site used for subjects that carry no site of their own
    pub current_site: SiteId,
    /// JSON snapshot of the in-memory graph store
    pub snapshot_path: PathBuf,
    /// Define the eight canonical edge types when they are missing
    pub bootstrap_edge_types: bool,
    /// Upper bound for one `edge_range` call in reverse queries; `None` fetches all at once
    pub range_page_size: Option<usize>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            current_site: SiteId(1),
            snapshot_path: PathBuf::from("interactions.json"),
            bootstrap_edge_types: true,
            range_page_size: None,
        }
    }
}

impl InteractionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
