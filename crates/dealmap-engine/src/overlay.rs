//! Country overlay building.
//!
//! Joins country aggregates with boundary features on the country name.
//! Only countries present on both sides get an overlay; misses on either
//! side are dropped without error.

use dealmap_common::{Project, ProjectType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::aggregate::CountryAggregates;
use crate::boundary::BoundaryCollection;

/// One country polygon with its popup payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryOverlay {
    pub country: String,
    pub geometry: Value,
    pub popup: CountryPopup,
}

/// Popup shown when a country is clicked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryPopup {
    pub country: String,
    pub by_type: Vec<TypeSubtotal>,
    pub total_mw: f64,
    /// Collapsible project listing: every project of the country,
    /// lost and unlocated ones included.
    pub projects: Vec<DrillDownRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSubtotal {
    pub project_type: ProjectType,
    pub power_mw: f64,
}

/// One row of the drill-down table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillDownRow {
    pub name: String,
    pub project_type: String,
    pub stage: String,
    /// Power as shown to the user, "N/A" when missing or not a number.
    pub power: String,
}

impl DrillDownRow {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            project_type: project.project_type.label().to_string(),
            stage: project.stage.label().to_string(),
            power: project.power.display(),
        }
    }
}

/// Build one overlay per country found in both `aggregates` and
/// `boundaries`, in boundary order.
pub fn build_country_overlays(
    aggregates: &CountryAggregates,
    boundaries: &BoundaryCollection,
    projects: &[Project],
) -> Vec<CountryOverlay> {
    let mut overlays = Vec::new();

    for feature in &boundaries.features {
        let Some(country) = feature.country_name() else {
            continue;
        };
        let Some(aggregate) = aggregates.get(country) else {
            continue;
        };
        // A boundary dataset may list the same country twice.
        if overlays.iter().any(|o: &CountryOverlay| o.country == country) {
            continue;
        }

        let popup = CountryPopup {
            country: country.to_string(),
            by_type: aggregate
                .by_type
                .iter()
                .map(|(project_type, power_mw)| TypeSubtotal {
                    project_type: *project_type,
                    power_mw: *power_mw,
                })
                .collect(),
            total_mw: aggregate.total,
            projects: projects
                .iter()
                .filter(|p| p.country == country)
                .map(DrillDownRow::from_project)
                .collect(),
        };

        overlays.push(CountryOverlay {
            country: country.to_string(),
            geometry: feature.geometry.clone(),
            popup,
        });
    }

    let unmatched = aggregates.len() - overlays.len();
    if unmatched > 0 {
        debug!(unmatched, "Countries without a boundary feature");
    }

    overlays
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_by_country;
    use crate::boundary::BoundaryFeature;
    use dealmap_common::{DealStage, Power, ProjectId};
    use serde_json::json;

    fn project(name: &str, country: &str, amount: Option<&str>, stage: DealStage) -> Project {
        Project {
            id: ProjectId::new(name),
            name: name.to_string(),
            coordinates: None,
            country: country.to_string(),
            project_type: ProjectType::Rooftop,
            power: Power::parse(amount),
            pipeline: None,
            stage,
        }
    }

    #[test]
    fn test_inner_join_on_country_name() {
        let projects = vec![
            project("a", "France", Some("3"), DealStage::Origination),
            project("b", "Atlantis", Some("7"), DealStage::Origination),
        ];
        let aggregates = aggregate_by_country(&projects);
        let boundaries = BoundaryCollection::new()
            .with_feature(BoundaryFeature::new("France", json!({"type": "Polygon"})))
            .with_feature(BoundaryFeature::new("Germany", json!({"type": "Polygon"})));

        let overlays = build_country_overlays(&aggregates, &boundaries, &projects);
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].country, "France");
        assert_eq!(overlays[0].geometry, json!({"type": "Polygon"}));
        assert_eq!(overlays[0].popup.total_mw, 3.0);
    }

    #[test]
    fn test_drill_down_lists_lost_and_missing_power() {
        let projects = vec![
            project("kept", "France", Some("3"), DealStage::Origination),
            project("lost", "France", Some("4"), DealStage::Lost),
            project("blank", "France", None, DealStage::Other("555".to_string())),
        ];
        let aggregates = aggregate_by_country(&projects);
        let boundaries =
            BoundaryCollection::new().with_feature(BoundaryFeature::new("France", Value::Null));

        let overlays = build_country_overlays(&aggregates, &boundaries, &projects);
        let rows = &overlays[0].popup.projects;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].stage, "Lost");
        assert_eq!(rows[2].power, "N/A");
        assert_eq!(rows[2].stage, "555");
        assert_eq!(overlays[0].popup.total_mw, 7.0);
    }

    #[test]
    fn test_duplicate_boundaries_yield_one_overlay() {
        let projects = vec![project("a", "France", Some("1"), DealStage::Origination)];
        let aggregates = aggregate_by_country(&projects);
        let boundaries = BoundaryCollection::new()
            .with_feature(BoundaryFeature::new("France", Value::Null))
            .with_feature(BoundaryFeature::new("France", Value::Null));

        assert_eq!(
            build_country_overlays(&aggregates, &boundaries, &projects).len(),
            1
        );
    }
}
