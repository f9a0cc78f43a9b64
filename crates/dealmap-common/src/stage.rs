//! Deal stage lookup table.
//!
//! The CRM reports stages as numeric identifiers. Known identifiers map to
//! a variant with a human label; anything else is carried through verbatim
//! and displayed as-is.

use serde::{Deserialize, Serialize};

use crate::NOT_AVAILABLE;

/// Progress stage of a deal in the solar pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealStage {
    Prospection,
    Origination,
    Feasibility,
    Development,
    ReadyToBuild,
    Construction,
    Operation,
    /// Terminal stage; never shown on the map.
    Lost,
    /// Unmapped identifier, or empty when the stage was missing.
    Other(String),
}

impl DealStage {
    /// Reserved identifier of the lost stage.
    pub const LOST_ID: &'static str = "134157050";

    const TABLE: [(&'static str, DealStage); 8] = [
        ("134157044", DealStage::Prospection),
        ("134157045", DealStage::Origination),
        ("134157046", DealStage::Feasibility),
        ("137866965", DealStage::Development),
        ("134157047", DealStage::ReadyToBuild),
        ("134157048", DealStage::Construction),
        ("134157049", DealStage::Operation),
        (Self::LOST_ID, DealStage::Lost),
    ];

    pub fn from_id(id: Option<&str>) -> Self {
        let id = id.map(str::trim).unwrap_or("");
        Self::TABLE
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(_, stage)| stage.clone())
            .unwrap_or_else(|| DealStage::Other(id.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            DealStage::Prospection => "Prospection",
            DealStage::Origination => "Origination",
            DealStage::Feasibility => "Feasibility",
            DealStage::Development => "Development",
            DealStage::ReadyToBuild => "Ready to build",
            DealStage::Construction => "Construction",
            DealStage::Operation => "In operation",
            DealStage::Lost => "Lost",
            DealStage::Other(raw) if raw.is_empty() => NOT_AVAILABLE,
            DealStage::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_lost(&self) -> bool {
        matches!(self, DealStage::Lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_stage_labels() {
        assert_eq!(DealStage::from_id(Some("134157045")), DealStage::Origination);
        assert_eq!(DealStage::from_id(Some("137866965")).label(), "Development");
        assert_eq!(DealStage::from_id(Some("134157047")).label(), "Ready to build");
    }

    #[test]
    fn test_lost_stage() {
        let stage = DealStage::from_id(Some(DealStage::LOST_ID));
        assert!(stage.is_lost());
        assert_eq!(stage.label(), "Lost");
    }

    #[test]
    fn test_unmapped_stage_passes_through() {
        let stage = DealStage::from_id(Some("999"));
        assert_eq!(stage, DealStage::Other("999".to_string()));
        assert_eq!(stage.label(), "999");
        assert!(!stage.is_lost());
    }

    #[test]
    fn test_missing_stage_displays_not_available() {
        let stage = DealStage::from_id(None);
        assert_eq!(stage.label(), "N/A");
    }
}
