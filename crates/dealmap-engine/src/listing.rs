//! Debug listing of the raw CRM page.

use dealmap_common::deal::present;
use dealmap_common::{RawDeal, NOT_AVAILABLE};
use serde::{Deserialize, Serialize};

/// One raw record, every value shown as received or "N/A".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRow {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub country: String,
    pub project_type: String,
    pub amount: String,
}

fn shown(value: &Option<String>) -> String {
    present(value).unwrap_or(NOT_AVAILABLE).to_string()
}

/// List every record of the page, before pipeline filtering. Records whose
/// coordinates do not parse are listed too.
pub fn debug_listing(deals: &[RawDeal]) -> Vec<ListingRow> {
    deals
        .iter()
        .map(|deal| {
            let props = &deal.properties;
            ListingRow {
                name: shown(&props.dealname),
                latitude: shown(&props.latitude),
                longitude: shown(&props.longitude),
                country: shown(&props.pays),
                project_type: shown(&props.project_type),
                amount: shown(&props.amount),
            }
        })
        .collect()
}
