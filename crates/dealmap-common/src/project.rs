//! Normalized project entity and its categorical lookups.

use serde::{Deserialize, Serialize};

use crate::stage::DealStage;
use crate::NOT_AVAILABLE;

/// CRM identity of a project.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for a record that arrived without one.
    pub fn synthetic(index: usize) -> Self {
        Self(format!("deal-{}", index))
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Installation type of a solar project.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ProjectType {
    Carport,
    Floating,
    Ground,
    Rooftop,
    Unknown,
}

impl ProjectType {
    /// Types that get their own top-level map layer.
    pub const KNOWN: [ProjectType; 4] = [
        ProjectType::Carport,
        ProjectType::Floating,
        ProjectType::Ground,
        ProjectType::Rooftop,
    ];

    /// Case-insensitive match against the known labels. Anything else,
    /// including a missing value, is `Unknown`.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return ProjectType::Unknown;
        };

        match value.trim().to_lowercase().as_str() {
            "carport" => ProjectType::Carport,
            "floating" => ProjectType::Floating,
            "ground" => ProjectType::Ground,
            "rooftop" => ProjectType::Rooftop,
            _ => ProjectType::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Carport => "Carport",
            ProjectType::Floating => "Floating",
            ProjectType::Ground => "Ground",
            ProjectType::Rooftop => "Rooftop",
            ProjectType::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ProjectType::Unknown)
    }

    /// Marker icon for this type.
    pub fn icon(&self) -> IconSpec {
        let (file, anchor) = match self {
            ProjectType::Carport => ("blue.png", [25, 50]),
            ProjectType::Floating => ("green.png", [12, 41]),
            ProjectType::Ground => ("yellow.png", [12, 41]),
            ProjectType::Rooftop => ("violet.png", [12, 41]),
            ProjectType::Unknown => ("grey.png", [12, 41]),
        };

        IconSpec {
            url: format!("/images/{}", file),
            size: [25, 41],
            anchor,
            popup_anchor: [0, -50],
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Marker icon descriptor handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSpec {
    pub url: String,
    /// Width and height in pixels.
    pub size: [i32; 2],
    /// Pixel of the icon placed on the marker position.
    pub anchor: [i32; 2],
    /// Popup offset relative to the anchor.
    pub popup_anchor: [i32; 2],
}

/// A validated WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    /// Returns `None` unless both components are finite.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        (lat.is_finite() && lon.is_finite()).then_some(Self { lat, lon })
    }
}

/// Power capacity in MWp with the raw CRM value kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Power {
    /// Parsed value, 0 when missing or unparsable.
    pub mw: f64,
    /// Trimmed CRM value, `None` when the property was missing.
    pub raw: Option<String>,
    /// Whether `raw` parsed as a finite number.
    pub parsed: bool,
}

impl Power {
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).filter(|v| !v.is_empty());
        let value = raw
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite());

        Self {
            mw: value.unwrap_or(0.0),
            raw: raw.map(str::to_string),
            parsed: value.is_some(),
        }
    }

    /// User-facing value: the CRM string when it is a number, otherwise "N/A".
    pub fn display(&self) -> String {
        match (&self.raw, self.parsed) {
            (Some(raw), true) => raw.clone(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

/// A normalized deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// `None` when latitude or longitude did not parse as a finite number.
    pub coordinates: Option<LatLon>,
    pub country: String,
    pub project_type: ProjectType,
    pub power: Power,
    pub pipeline: Option<String>,
    pub stage: DealStage,
}

impl Project {
    pub fn power_mw(&self) -> f64 {
        self.power.mw
    }

    pub fn is_lost(&self) -> bool {
        self.stage.is_lost()
    }
}
