//! Behaviour switches for one build of the map.

use serde::{Deserialize, Serialize};

use crate::encoder::ClusterStyle;

/// Pipeline holding the solar deals.
pub const DEFAULT_PIPELINE: &str = "52295361";

/// Options controlling intake filtering, lost-deal handling and clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Keep only deals of this pipeline. `None` keeps every record.
    pub pipeline: Option<String>,

    /// Leave lost deals off the map. They still count towards the
    /// country aggregates and appear in the drill-down listing.
    pub hide_lost: bool,

    /// Group markers into (country, type) clusters. When off, markers go
    /// straight into their type layer.
    pub clustering: bool,

    /// Sizing of cluster icons.
    pub cluster_style: ClusterStyle,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            pipeline: Some(DEFAULT_PIPELINE.to_string()),
            hide_lost: true,
            clustering: true,
            cluster_style: ClusterStyle::default(),
        }
    }
}

impl EngineOptions {
    /// Options that keep every record and show every located deal.
    pub fn unfiltered() -> Self {
        Self {
            pipeline: None,
            hide_lost: false,
            ..Self::default()
        }
    }
}
