//! Country boundary geometry.
//!
//! A static GeoJSON FeatureCollection. Only `properties.ADMIN` (the country
//! name) is interpreted; geometry is passed through untouched to the
//! rendering surface.

use dealmap_common::{DealMapError, DealMapResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property holding the country name used as the join key.
pub const COUNTRY_NAME_PROPERTY: &str = "ADMIN";

/// A GeoJSON FeatureCollection of country boundaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundaryCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(default)]
    pub features: Vec<BoundaryFeature>,
}

impl BoundaryCollection {
    pub fn new() -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: Vec::new(),
        }
    }

    pub fn with_feature(mut self, feature: BoundaryFeature) -> Self {
        self.features.push(feature);
        self
    }

    /// Parse a FeatureCollection document.
    pub fn from_slice(bytes: &[u8]) -> DealMapResult<Self> {
        let collection: Self = serde_json::from_slice(bytes)
            .map_err(|e| DealMapError::BoundaryDecode(e.to_string()))?;

        if collection.type_ != "FeatureCollection" {
            return Err(DealMapError::BoundaryDecode(format!(
                "expected a FeatureCollection, got {}",
                collection.type_
            )));
        }

        Ok(collection)
    }

    /// Find the boundary of a country by name.
    pub fn find(&self, country: &str) -> Option<&BoundaryFeature> {
        self.features
            .iter()
            .find(|f| f.country_name() == Some(country))
    }
}

impl Default for BoundaryCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// One country boundary feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundaryFeature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type", default = "feature_type")]
    pub type_: String,

    #[serde(default)]
    pub properties: Map<String, Value>,

    /// Polygon or MultiPolygon geometry, kept opaque.
    #[serde(default)]
    pub geometry: Value,
}

fn feature_type() -> String {
    "Feature".to_string()
}

impl BoundaryFeature {
    pub fn new(country: impl Into<String>, geometry: Value) -> Self {
        let mut properties = Map::new();
        properties.insert(
            COUNTRY_NAME_PROPERTY.to_string(),
            Value::String(country.into()),
        );

        Self {
            type_: feature_type(),
            properties,
            geometry,
        }
    }

    /// Country name, if the feature carries a string `ADMIN` property.
    pub fn country_name(&self) -> Option<&str> {
        self.properties
            .get(COUNTRY_NAME_PROPERTY)
            .and_then(Value::as_str)
    }
}
