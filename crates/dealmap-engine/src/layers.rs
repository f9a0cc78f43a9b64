//! Layer composition.
//!
//! Wires normalized projects, cluster buckets and country overlays into the
//! named overlays of the map's layer control: one per known project type
//! plus "Countries".

use dealmap_common::{Project, ProjectType, RawDeal};
use tracing::info;

use crate::aggregate::{aggregate_by_country, CountryAggregates};
use crate::boundary::BoundaryCollection;
use crate::normalize::{intake, is_mappable};
use crate::options::EngineOptions;
use crate::overlay::{build_country_overlays, CountryOverlay};
use crate::router::ClusterBuckets;
use crate::surface::{ClusterGroup, MapDocument, Marker, RenderSurface};

/// Name of the country polygon overlay.
pub const COUNTRIES_OVERLAY: &str = "Countries";

/// Everything needed to render one snapshot.
#[derive(Debug)]
pub struct MapLayers<'a> {
    pub projects: &'a [Project],
    pub buckets: ClusterBuckets<'a>,
    pub countries: Vec<CountryOverlay>,
    pub options: &'a EngineOptions,
}

/// Route projects into buckets and join aggregates with boundaries.
pub fn compose<'a>(
    projects: &'a [Project],
    aggregates: &CountryAggregates,
    boundaries: &BoundaryCollection,
    options: &'a EngineOptions,
) -> MapLayers<'a> {
    MapLayers {
        projects,
        buckets: ClusterBuckets::build(projects, options),
        countries: build_country_overlays(aggregates, boundaries, projects),
        options,
    }
}

impl<'a> MapLayers<'a> {
    /// Names of the overlays, in layer control order.
    pub fn overlay_names() -> Vec<&'static str> {
        ProjectType::KNOWN
            .iter()
            .map(ProjectType::label)
            .chain(std::iter::once(COUNTRIES_OVERLAY))
            .collect()
    }

    /// Hand every layer to the surface.
    pub fn render<S: RenderSurface>(self, surface: &mut S) {
        let style = self.options.cluster_style;
        surface.set_cluster_style(style);

        for name in Self::overlay_names() {
            surface.register_overlay(name);
        }

        if self.options.clustering {
            for project_type in ProjectType::KNOWN {
                for bucket in self.buckets.layer(project_type) {
                    let group = ClusterGroup {
                        key: bucket.key.clone(),
                        icon: style.encode(bucket.projects.iter().copied()),
                        markers: bucket
                            .projects
                            .iter()
                            .filter_map(|p| Marker::from_project(p))
                            .collect(),
                    };
                    surface.add_cluster_group(project_type.label(), group);
                }
            }
        } else {
            for project in self
                .projects
                .iter()
                .filter(|p| p.project_type.is_known() && is_mappable(p, self.options))
            {
                if let Some(marker) = Marker::from_project(project) {
                    surface.add_marker(project.project_type.label(), marker);
                }
            }
        }

        for country in self.countries {
            surface.add_country_overlay(COUNTRIES_OVERLAY, country);
        }
    }
}

/// Build the map document for one CRM page.
pub fn build_map(
    deals: &[RawDeal],
    boundaries: &BoundaryCollection,
    options: &EngineOptions,
) -> MapDocument {
    let projects = intake(deals, options);
    let aggregates = aggregate_by_country(&projects);
    let layers = compose(&projects, &aggregates, boundaries, options);

    let buckets = layers.buckets.len();
    let countries = layers.countries.len();

    let mut document = MapDocument::new();
    layers.render(&mut document);

    info!(
        deals = deals.len(),
        projects = projects.len(),
        markers = document.marker_count(),
        buckets,
        countries,
        "Built map document"
    );

    document
}
