//! Map document, debug listing and cluster icon handlers.
//!
//! A failed CRM fetch never fails these endpoints: the error is logged and
//! the engine runs on an empty page, which renders nothing.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    Json,
};
use dealmap_common::DealPage;
use dealmap_engine::{build_map, debug_listing, ClusterIcon, ListingRow, MapDocument};
use serde::Deserialize;

use crate::state::AppState;

async fn fetch_or_empty(state: &AppState) -> DealPage {
    match state.source.fetch_deals().await {
        Ok(page) => page,
        Err(e) => {
            tracing::error!("Failed to fetch deals, rendering an empty map: {}", e);
            DealPage::default()
        }
    }
}

/// GET /api/map
///
/// Builds the full map document from one CRM page and the boundary file.
pub async fn map_handler(Extension(state): Extension<Arc<AppState>>) -> Json<MapDocument> {
    let page = fetch_or_empty(&state).await;
    let boundaries = state.load_boundaries().await;

    Json(build_map(&page.results, &boundaries, &state.config.engine))
}

/// GET /api/listing
///
/// Every record of the CRM page, unfiltered, values shown raw or "N/A".
pub async fn listing_handler(Extension(state): Extension<Arc<AppState>>) -> Json<Vec<ListingRow>> {
    let page = fetch_or_empty(&state).await;
    Json(debug_listing(&page.results))
}

/// Query parameters for the cluster icon endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct ClusterIconParams {
    /// Total power of the cluster in MWp.
    pub power: Option<f64>,

    /// Number of markers in the cluster.
    pub count: Option<usize>,
}

/// GET /api/cluster-icon?power=..&count=..
///
/// Sizes a cluster the map formed on its own at the current zoom level.
pub async fn cluster_icon_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ClusterIconParams>,
) -> Json<ClusterIcon> {
    let style = state.config.engine.cluster_style;
    Json(style.encode_total(params.power.unwrap_or(0.0), params.count.unwrap_or(0)))
}
