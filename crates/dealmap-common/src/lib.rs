//! Common types shared across the solar deal map crates.

pub mod deal;
pub mod error;
pub mod project;
pub mod stage;

pub use deal::{DealPage, DealProperties, RawDeal, DEAL_PROPERTIES};
pub use error::{DealMapError, DealMapResult};
pub use project::{IconSpec, LatLon, Power, Project, ProjectId, ProjectType};
pub use stage::DealStage;

/// Placeholder shown to users for any missing value.
pub const NOT_AVAILABLE: &str = "N/A";
