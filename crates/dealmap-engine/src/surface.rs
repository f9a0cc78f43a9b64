//! Rendering surface contract.
//!
//! The map itself (tiles, projection, pan/zoom, the distance-based merging
//! of nearby markers) belongs to the rendering surface. The engine only
//! hands it markers, cluster groups, country polygons and overlay names.
//! [`MapDocument`] is a surface that records everything into a JSON
//! document for a browser map to replay.

use chrono::{DateTime, Utc};
use dealmap_common::{IconSpec, Project, ProjectId, ProjectType};
use serde::{Deserialize, Serialize};

use crate::encoder::{ClusterIcon, ClusterStyle};
use crate::overlay::CountryOverlay;
use crate::router::ClusterKey;

/// Operations the engine needs from a map.
pub trait RenderSurface {
    /// Make an overlay available in the layer toggle control.
    fn register_overlay(&mut self, name: &str);

    /// Place a standalone marker in an overlay.
    fn add_marker(&mut self, overlay: &str, marker: Marker);

    /// Add a cluster group to an overlay.
    fn add_cluster_group(&mut self, overlay: &str, group: ClusterGroup);

    /// Add a country polygon with its popup to an overlay.
    fn add_country_overlay(&mut self, overlay: &str, country: CountryOverlay);

    /// Scale the surface must use when it sizes a cluster it formed itself.
    fn set_cluster_style(&mut self, style: ClusterStyle);
}

/// Popup of a single marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPopup {
    pub name: String,
    /// Power in MWp as shown to the user, "N/A" when unknown.
    pub power: String,
    pub country: String,
    pub project_type: String,
}

/// A project pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: ProjectId,
    pub lat: f64,
    pub lon: f64,
    pub project_type: ProjectType,
    /// Power counted when the surface merges this marker into a cluster.
    pub power_mw: f64,
    pub icon: IconSpec,
    pub popup: MarkerPopup,
}

impl Marker {
    /// Returns `None` for projects without valid coordinates.
    pub fn from_project(project: &Project) -> Option<Self> {
        let position = project.coordinates?;

        Some(Self {
            id: project.id.clone(),
            lat: position.lat,
            lon: position.lon,
            project_type: project.project_type,
            power_mw: project.power_mw(),
            icon: project.project_type.icon(),
            popup: MarkerPopup {
                name: project.name.clone(),
                power: project.power.display(),
                country: project.country.clone(),
                project_type: project.project_type.label().to_string(),
            },
        })
    }
}

/// Markers of one (country, type) bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterGroup {
    pub key: ClusterKey,
    /// Encoding of the whole bucket.
    pub icon: ClusterIcon,
    pub markers: Vec<Marker>,
}

/// One named overlay of the layer control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayLayer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_groups: Vec<ClusterGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<CountryOverlay>,
}

impl OverlayLayer {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            markers: Vec::new(),
            cluster_groups: Vec::new(),
            countries: Vec::new(),
        }
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
            + self
                .cluster_groups
                .iter()
                .map(|g| g.markers.len())
                .sum::<usize>()
    }
}

/// A serializable recording of everything rendered for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub generated_at: DateTime<Utc>,
    pub cluster_style: ClusterStyle,
    /// Overlays in registration order.
    pub overlays: Vec<OverlayLayer>,
}

impl MapDocument {
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            cluster_style: ClusterStyle::default(),
            overlays: Vec::new(),
        }
    }

    pub fn overlay(&self, name: &str) -> Option<&OverlayLayer> {
        self.overlays.iter().find(|o| o.name == name)
    }

    pub fn overlay_names(&self) -> Vec<&str> {
        self.overlays.iter().map(|o| o.name.as_str()).collect()
    }

    /// Every marker, clustered or not.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.overlays.iter().flat_map(|o| {
            o.markers
                .iter()
                .chain(o.cluster_groups.iter().flat_map(|g| g.markers.iter()))
        })
    }

    pub fn marker_count(&self) -> usize {
        self.overlays.iter().map(OverlayLayer::marker_count).sum()
    }

    /// Every country polygon.
    pub fn countries(&self) -> impl Iterator<Item = &CountryOverlay> {
        self.overlays.iter().flat_map(|o| o.countries.iter())
    }

    fn overlay_mut(&mut self, name: &str) -> &mut OverlayLayer {
        let index = match self.overlays.iter().position(|o| o.name == name) {
            Some(index) => index,
            None => {
                self.overlays.push(OverlayLayer::new(name));
                self.overlays.len() - 1
            }
        };
        &mut self.overlays[index]
    }
}

impl Default for MapDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for MapDocument {
    fn register_overlay(&mut self, name: &str) {
        self.overlay_mut(name);
    }

    fn add_marker(&mut self, overlay: &str, marker: Marker) {
        self.overlay_mut(overlay).markers.push(marker);
    }

    fn add_cluster_group(&mut self, overlay: &str, group: ClusterGroup) {
        self.overlay_mut(overlay).cluster_groups.push(group);
    }

    fn add_country_overlay(&mut self, overlay: &str, country: CountryOverlay) {
        self.overlay_mut(overlay).countries.push(country);
    }

    fn set_cluster_style(&mut self, style: ClusterStyle) {
        self.cluster_style = style;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealmap_common::{DealStage, LatLon, Power};

    fn project(coordinates: Option<LatLon>) -> Project {
        Project {
            id: ProjectId::new("42"),
            name: "Lyon Carport".to_string(),
            coordinates,
            country: "France".to_string(),
            project_type: ProjectType::Carport,
            power: Power::parse(Some("abc")),
            pipeline: None,
            stage: DealStage::Origination,
        }
    }

    #[test]
    fn test_marker_requires_coordinates() {
        assert!(Marker::from_project(&project(None)).is_none());

        let marker = Marker::from_project(&project(LatLon::new(45.76, 4.83))).unwrap();
        assert_eq!(marker.lat, 45.76);
        assert_eq!(marker.lon, 4.83);
        assert_eq!(marker.icon.url, "/images/blue.png");
        assert_eq!(marker.popup.power, "N/A");
        assert_eq!(marker.popup.project_type, "Carport");
        assert_eq!(marker.power_mw, 0.0);
    }

    #[test]
    fn test_overlays_keep_registration_order() {
        let mut doc = MapDocument::new();
        doc.register_overlay("Ground");
        doc.register_overlay("Countries");
        doc.register_overlay("Ground");
        assert_eq!(doc.overlay_names(), vec!["Ground", "Countries"]);
    }

    #[test]
    fn test_document_serializes_without_empty_sections() {
        let mut doc = MapDocument::new();
        doc.register_overlay("Rooftop");
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["overlays"][0]["name"], "Rooftop");
        assert!(json["overlays"][0].get("markers").is_none());
        assert_eq!(json["cluster_style"]["base_size"], 20.0);
    }
}
