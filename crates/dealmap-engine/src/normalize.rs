//! Record normalization.
//!
//! Coerces raw CRM records into [`Project`]s. Nothing here fails: bad
//! coordinates drop a record from the map only, bad power counts as 0,
//! unknown categories fall back to `Unknown` or the raw identifier.

use dealmap_common::deal::present;
use dealmap_common::{DealStage, LatLon, Power, Project, ProjectId, ProjectType, RawDeal};
use tracing::debug;

use crate::options::EngineOptions;

/// Name given to a deal without a name.
pub const UNKNOWN_NAME: &str = "unknown";

/// Country given to a deal without a country.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Parse a coordinate component. Only finite numbers are accepted.
pub fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Normalize one record. `index` is the record's position in its page and
/// only matters when the record has no CRM id.
pub fn normalize_record(index: usize, deal: &RawDeal) -> Project {
    let props = &deal.properties;

    let id = present(&deal.id)
        .map(ProjectId::new)
        .unwrap_or_else(|| ProjectId::synthetic(index));

    let coordinates = match (
        parse_coordinate(props.latitude.as_deref()),
        parse_coordinate(props.longitude.as_deref()),
    ) {
        (Some(lat), Some(lon)) => LatLon::new(lat, lon),
        _ => None,
    };

    Project {
        id,
        name: present(&props.dealname).unwrap_or(UNKNOWN_NAME).to_string(),
        coordinates,
        country: present(&props.pays).unwrap_or(UNKNOWN_COUNTRY).to_string(),
        project_type: ProjectType::parse(present(&props.project_type)),
        power: Power::parse(props.amount.as_deref()),
        pipeline: present(&props.pipeline).map(str::to_string),
        stage: DealStage::from_id(present(&props.dealstage)),
    }
}

/// Filter a page to the configured pipeline and normalize what remains.
pub fn intake(deals: &[RawDeal], options: &EngineOptions) -> Vec<Project> {
    let mut dropped = 0usize;

    let projects: Vec<Project> = deals
        .iter()
        .enumerate()
        .filter(|(_, deal)| {
            let keep = match options.pipeline.as_deref() {
                Some(wanted) => present(&deal.properties.pipeline) == Some(wanted),
                None => true,
            };
            if !keep {
                dropped += 1;
            }
            keep
        })
        .map(|(index, deal)| normalize_record(index, deal))
        .collect();

    if dropped > 0 {
        debug!(
            dropped,
            kept = projects.len(),
            pipeline = ?options.pipeline,
            "Dropped deals from other pipelines"
        );
    }

    projects
}

/// Whether a project gets a marker: it needs coordinates and, when lost
/// deals are hidden, must not be lost.
pub fn is_mappable(project: &Project, options: &EngineOptions) -> bool {
    project.coordinates.is_some() && !(options.hide_lost && project.is_lost())
}
