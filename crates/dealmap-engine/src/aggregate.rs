//! Per-country power aggregation.

use std::collections::BTreeMap;

use dealmap_common::{Project, ProjectType};
use serde::{Deserialize, Serialize};

/// Aggregates keyed by country name.
pub type CountryAggregates = BTreeMap<String, CountryAggregate>;

/// Power totals for one country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryAggregate {
    /// Power in MWp per project type.
    pub by_type: BTreeMap<ProjectType, f64>,

    /// Sum of `by_type`.
    pub total: f64,

    /// Number of projects counted, including those with zero power.
    pub project_count: usize,
}

impl CountryAggregate {
    fn add(&mut self, project: &Project) {
        *self.by_type.entry(project.project_type).or_insert(0.0) += project.power_mw();
        self.project_count += 1;
    }

    /// Recompute `total` from the per-type subtotals.
    fn finalize(&mut self) {
        self.total = self.by_type.values().sum();
    }
}

/// Sum power by country and by (country, type) in a single pass.
///
/// Coordinates are not required, and lost deals are counted.
pub fn aggregate_by_country(projects: &[Project]) -> CountryAggregates {
    let mut aggregates = CountryAggregates::new();

    for project in projects {
        aggregates
            .entry(project.country.clone())
            .or_default()
            .add(project);
    }

    for aggregate in aggregates.values_mut() {
        aggregate.finalize();
    }

    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealmap_common::{DealStage, Power, ProjectId};

    fn project(country: &str, project_type: ProjectType, amount: &str) -> Project {
        Project {
            id: ProjectId::new(format!("{}-{}-{}", country, project_type, amount)),
            name: "p".to_string(),
            coordinates: None,
            country: country.to_string(),
            project_type,
            power: Power::parse(Some(amount)),
            pipeline: None,
            stage: DealStage::Lost,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_country(&[]).is_empty());
    }

    #[test]
    fn test_groups_by_country_and_type() {
        let projects = vec![
            project("France", ProjectType::Ground, "10"),
            project("France", ProjectType::Ground, "2.5"),
            project("France", ProjectType::Rooftop, "5"),
            project("Spain", ProjectType::Floating, "abc"),
        ];

        let aggregates = aggregate_by_country(&projects);
        assert_eq!(aggregates.len(), 2);

        let france = &aggregates["France"];
        assert_eq!(france.by_type.get(&ProjectType::Ground), Some(&12.5));
        assert_eq!(france.by_type.get(&ProjectType::Rooftop), Some(&5.0));
        assert_eq!(france.by_type.get(&ProjectType::Carport), None);
        assert_eq!(france.total, 17.5);
        assert_eq!(france.project_count, 3);

        let spain = &aggregates["Spain"];
        assert_eq!(spain.total, 0.0);
        assert_eq!(spain.project_count, 1);
        assert_eq!(spain.by_type.get(&ProjectType::Floating), Some(&0.0));
    }
}
