//! End-to-end builds of the map document from CRM pages.

use dealmap_common::ProjectType;
use dealmap_engine::{
    aggregate_by_country, build_map, compose, debug_listing, intake, BoundaryCollection,
    EngineOptions, MapDocument, MapLayers, COUNTRIES_OVERLAY,
};
use test_utils::{assert_approx_eq, boundary_fixture_path, fixtures, france_pair, mixed_page};

fn fixture_boundaries() -> BoundaryCollection {
    let bytes = std::fs::read(boundary_fixture_path()).unwrap();
    BoundaryCollection::from_slice(&bytes).unwrap()
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_france_pair() {
    let deals = france_pair();
    let doc = build_map(&deals, &fixture_boundaries(), &EngineOptions::default());

    // Only the located Ground deal gets a marker.
    assert_eq!(doc.marker_count(), 1);
    let marker = doc.markers().next().unwrap();
    assert_eq!(marker.lat, 48.85);
    assert_eq!(marker.lon, 2.35);
    assert_eq!(marker.popup.name, "Paris Ground");

    let france: Vec<_> = doc.countries().collect();
    assert_eq!(france.len(), 1);
    let popup = &france[0].popup;
    assert_eq!(popup.total_mw, 15.0);
    assert_eq!(popup.by_type.len(), 2);
    assert_eq!(popup.by_type[0].project_type, ProjectType::Ground);
    assert_eq!(popup.by_type[0].power_mw, 10.0);
    assert_eq!(popup.by_type[1].project_type, ProjectType::Rooftop);
    assert_eq!(popup.by_type[1].power_mw, 5.0);

    assert_eq!(popup.projects.len(), 2);
    assert_eq!(popup.projects[0].stage, "Origination");
    assert_eq!(popup.projects[1].stage, "Development");
    assert_eq!(popup.projects[1].power, "5");
}

#[test]
fn test_empty_input() {
    let doc = build_map(&[], &fixture_boundaries(), &EngineOptions::default());
    assert_eq!(doc.marker_count(), 0);
    assert_eq!(doc.countries().count(), 0);
    assert_eq!(
        doc.overlay_names(),
        vec!["Carport", "Floating", "Ground", "Rooftop", COUNTRIES_OVERLAY]
    );
}

#[test]
fn test_non_numeric_power() {
    let deals = vec![fixtures::DealBuilder::new()
        .name("Text Power")
        .at("43.6", "1.44")
        .country("France")
        .project_type("Rooftop")
        .amount("abc")
        .build()];

    let doc = build_map(&deals, &fixture_boundaries(), &EngineOptions::default());
    let marker = doc.markers().next().unwrap();
    assert_eq!(marker.popup.power, "N/A");
    assert_eq!(marker.power_mw, 0.0);

    let france = doc.countries().next().unwrap();
    assert_eq!(france.popup.total_mw, 0.0);
    assert_eq!(france.popup.projects[0].power, "N/A");
}

// ============================================================================
// Mixed page
// ============================================================================

#[test]
fn test_mixed_page_layers() {
    let page = mixed_page();
    let doc = build_map(&page.results, &fixture_boundaries(), &EngineOptions::default());

    // Carport (Lyon), Ground (Madrid), Floating (Sevilla). Valencia is lost,
    // Berlin is of unknown type, Belgium is another pipeline, the blank
    // record has no coordinates.
    assert_eq!(doc.marker_count(), 3);
    assert_eq!(doc.overlay("Carport").unwrap().marker_count(), 1);
    assert_eq!(doc.overlay("Ground").unwrap().marker_count(), 1);
    assert_eq!(doc.overlay("Floating").unwrap().marker_count(), 1);
    assert_eq!(doc.overlay("Rooftop").unwrap().marker_count(), 0);

    let countries: Vec<_> = doc.countries().map(|c| c.country.as_str()).collect();
    assert_eq!(countries, vec!["France", "Spain", "Germany"]);

    let spain = doc.countries().find(|c| c.country == "Spain").unwrap();
    assert_eq!(spain.popup.total_mw, 150.0);
    assert_eq!(spain.popup.projects.len(), 3);

    let germany = doc.countries().find(|c| c.country == "Germany").unwrap();
    assert_eq!(germany.popup.projects[0].project_type, "Unknown");
    assert_eq!(germany.popup.projects[0].stage, "999999");
}

#[test]
fn test_cluster_icon_reflects_bucket_power() {
    let page = mixed_page();
    let doc = build_map(&page.results, &fixture_boundaries(), &EngineOptions::default());

    let ground = doc.overlay("Ground").unwrap();
    assert_eq!(ground.cluster_groups.len(), 1);
    let icon = &ground.cluster_groups[0].icon;
    assert_eq!(icon.label, "120");
    assert_eq!(icon.count, 1);
    assert_approx_eq!(icon.size, 20.0 + 5.0 * 121.0_f64.ln(), 1e-9);
}

#[test]
fn test_clustering_disabled_places_plain_markers() {
    let page = mixed_page();
    let options = EngineOptions {
        clustering: false,
        ..EngineOptions::default()
    };
    let doc = build_map(&page.results, &fixture_boundaries(), &options);

    assert_eq!(doc.marker_count(), 3);
    for overlay in &doc.overlays {
        assert!(overlay.cluster_groups.is_empty());
    }
    assert_eq!(doc.overlay("Carport").unwrap().markers.len(), 1);
}

#[test]
fn test_compose_with_custom_surface() {
    let page = mixed_page();
    let options = EngineOptions::unfiltered();
    let projects = intake(&page.results, &options);
    let aggregates = aggregate_by_country(&projects);

    let layers: MapLayers = compose(&projects, &aggregates, &BoundaryCollection::default(), &options);
    // Unfiltered keeps Valencia (lost) and the other-pipeline Belgium deal.
    assert_eq!(layers.buckets.marker_count(), 6);
    assert!(layers.countries.is_empty());

    let mut doc = MapDocument::new();
    layers.render(&mut doc);
    // Berlin sits in an Unknown bucket that no overlay exposes.
    assert_eq!(doc.marker_count(), 5);
}

#[test]
fn test_listing_covers_whole_page() {
    let page = mixed_page();
    let rows = debug_listing(&page.results);
    assert_eq!(rows.len(), page.results.len());
    assert_eq!(rows[6].name, "N/A");
}
