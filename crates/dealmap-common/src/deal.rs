//! Raw deal records as returned by the CRM list endpoint.
//!
//! Every property is string-typed on the wire. A key may be absent or
//! `null`; both are treated as "missing" and decode to `None`.

use serde::{Deserialize, Serialize};

/// Deal properties requested from the CRM, in request order.
pub const DEAL_PROPERTIES: [&str; 8] = [
    "latitude",
    "longitude",
    "dealname",
    "pays",
    "type_of_project__pv_",
    "amount",
    "pipeline",
    "dealstage",
];

/// One page of deals from the CRM list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DealPage {
    /// Deal records on this page.
    #[serde(default)]
    pub results: Vec<RawDeal>,
}

impl DealPage {
    pub fn new(results: Vec<RawDeal>) -> Self {
        Self { results }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A single deal record with its untyped property bag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawDeal {
    /// CRM record identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub properties: DealProperties,
}

impl RawDeal {
    pub fn new(properties: DealProperties) -> Self {
        Self {
            id: None,
            properties,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// The fixed property schema of a deal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DealProperties {
    #[serde(default)]
    pub latitude: Option<String>,

    #[serde(default)]
    pub longitude: Option<String>,

    /// Deal name.
    #[serde(default)]
    pub dealname: Option<String>,

    /// Country name ("pays").
    #[serde(default)]
    pub pays: Option<String>,

    /// Installation type (Carport, Floating, Ground, Rooftop).
    #[serde(default, rename = "type_of_project__pv_")]
    pub project_type: Option<String>,

    /// Power capacity in MWp, stored by the CRM in the amount field.
    #[serde(default)]
    pub amount: Option<String>,

    #[serde(default)]
    pub pipeline: Option<String>,

    #[serde(default)]
    pub dealstage: Option<String>,
}

/// Treat blank strings the same as a missing property.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_page_with_missing_and_null_properties() {
        let json = r#"{
            "results": [
                {
                    "id": "1001",
                    "properties": {
                        "latitude": "48.85",
                        "longitude": null,
                        "dealname": "Paris Carport",
                        "type_of_project__pv_": "carport"
                    }
                },
                { "properties": {} }
            ],
            "paging": { "next": { "after": "100" } }
        }"#;

        let page: DealPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 2);

        let first = &page.results[0];
        assert_eq!(first.id.as_deref(), Some("1001"));
        assert_eq!(first.properties.latitude.as_deref(), Some("48.85"));
        assert_eq!(first.properties.longitude, None);
        assert_eq!(first.properties.project_type.as_deref(), Some("carport"));
        assert_eq!(first.properties.amount, None);

        assert_eq!(page.results[1], RawDeal::default());
    }

    #[test]
    fn test_decode_page_without_results() {
        let page: DealPage = serde_json::from_str("{}").unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_present_treats_blank_as_missing() {
        assert_eq!(present(&Some("  ".to_string())), None);
        assert_eq!(present(&Some(" France ".to_string())), Some("France"));
        assert_eq!(present(&None), None);
    }
}
