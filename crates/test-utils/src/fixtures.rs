//! Common test fixtures for deal map tests.
//!
//! This module provides pre-defined CRM records that represent common
//! scenarios: well-formed deals, broken coordinates, lost deals, deals of
//! other pipelines.

use dealmap_common::{DealPage, DealProperties, RawDeal};
use serde_json::{json, Value};

/// Well-known CRM identifiers.
pub mod ids {
    /// Pipeline holding the solar deals.
    pub const SOLAR_PIPELINE: &str = "52295361";

    /// Any other pipeline.
    pub const OTHER_PIPELINE: &str = "default";

    pub const STAGE_ORIGINATION: &str = "134157045";
    pub const STAGE_DEVELOPMENT: &str = "137866965";
    pub const STAGE_LOST: &str = "134157050";
}

/// Builder for raw CRM deal records.
#[derive(Debug, Clone, Default)]
pub struct DealBuilder {
    deal: RawDeal,
}

impl DealBuilder {
    /// A solar-pipeline deal with no other property set.
    pub fn new() -> Self {
        let mut builder = Self::default();
        builder.deal.properties.pipeline = Some(ids::SOLAR_PIPELINE.to_string());
        builder
    }

    pub fn id(mut self, id: &str) -> Self {
        self.deal.id = Some(id.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.deal.properties.dealname = Some(name.to_string());
        self
    }

    pub fn at(mut self, lat: &str, lon: &str) -> Self {
        self.deal.properties.latitude = Some(lat.to_string());
        self.deal.properties.longitude = Some(lon.to_string());
        self
    }

    pub fn country(mut self, country: &str) -> Self {
        self.deal.properties.pays = Some(country.to_string());
        self
    }

    pub fn project_type(mut self, project_type: &str) -> Self {
        self.deal.properties.project_type = Some(project_type.to_string());
        self
    }

    pub fn amount(mut self, amount: &str) -> Self {
        self.deal.properties.amount = Some(amount.to_string());
        self
    }

    pub fn pipeline(mut self, pipeline: Option<&str>) -> Self {
        self.deal.properties.pipeline = pipeline.map(str::to_string);
        self
    }

    pub fn stage(mut self, stage: &str) -> Self {
        self.deal.properties.dealstage = Some(stage.to_string());
        self
    }

    pub fn build(self) -> RawDeal {
        self.deal
    }
}

/// The two-record France page: one located Ground deal, one Rooftop deal
/// whose latitude does not parse.
pub fn france_pair() -> Vec<RawDeal> {
    vec![
        DealBuilder::new()
            .id("1")
            .name("Paris Ground")
            .at("48.85", "2.35")
            .country("France")
            .project_type("Ground")
            .amount("10")
            .stage(ids::STAGE_ORIGINATION)
            .build(),
        DealBuilder::new()
            .id("2")
            .name("Lille Rooftop")
            .at("bad", "2.0")
            .country("France")
            .project_type("Rooftop")
            .amount("5")
            .stage(ids::STAGE_DEVELOPMENT)
            .build(),
    ]
}

/// A mixed page covering every edge the engine handles.
pub fn mixed_page() -> DealPage {
    DealPage::new(vec![
        DealBuilder::new()
            .id("10")
            .name("Lyon Carport")
            .at("45.76", "4.83")
            .country("France")
            .project_type("carport")
            .amount("2.5")
            .stage(ids::STAGE_ORIGINATION)
            .build(),
        DealBuilder::new()
            .id("11")
            .name("Madrid Ground")
            .at("40.41", "-3.70")
            .country("Spain")
            .project_type("GROUND")
            .amount("120")
            .stage(ids::STAGE_DEVELOPMENT)
            .build(),
        DealBuilder::new()
            .id("12")
            .name("Sevilla Floating")
            .at("37.38", "-5.98")
            .country("Spain")
            .project_type("Floating")
            .amount("abc")
            .stage(ids::STAGE_ORIGINATION)
            .build(),
        DealBuilder::new()
            .id("13")
            .name("Valencia Lost")
            .at("39.46", "-0.37")
            .country("Spain")
            .project_type("Ground")
            .amount("30")
            .stage(ids::STAGE_LOST)
            .build(),
        DealBuilder::new()
            .id("14")
            .name("Berlin Agri")
            .at("52.52", "13.40")
            .country("Germany")
            .project_type("agrivoltaic")
            .amount("7")
            .stage("999999")
            .build(),
        DealBuilder::new()
            .id("15")
            .name("Other Pipeline")
            .at("50.0", "5.0")
            .country("Belgium")
            .project_type("Rooftop")
            .amount("1")
            .pipeline(Some(ids::OTHER_PIPELINE))
            .build(),
        RawDeal::new(DealProperties {
            pipeline: Some(ids::SOLAR_PIPELINE.to_string()),
            ..Default::default()
        }),
    ])
}

/// A CRM list response body as JSON, as the CRM would return it.
pub fn crm_response_json(page: &DealPage) -> Value {
    json!({
        "results": page.results,
        "paging": { "next": { "after": "100" } }
    })
}

/// A boundary collection with one small square feature per country.
pub fn boundary_json(countries: &[&str]) -> Value {
    let features: Vec<Value> = countries
        .iter()
        .map(|country| {
            json!({
                "type": "Feature",
                "properties": { "ADMIN": country },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }
            })
        })
        .collect();

    json!({ "type": "FeatureCollection", "features": features })
}
