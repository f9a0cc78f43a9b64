//! Application state for the deal map service.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use dealmap_common::DealMapResult;
use dealmap_engine::BoundaryCollection;

use crate::config::{CrmConfig, DashboardConfig};
use crate::crm::{DealSource, HubSpotClient};

/// Shared application state.
pub struct AppState {
    /// Where deals come from.
    pub source: Arc<dyn DealSource>,

    /// Dashboard configuration, read-only after start-up.
    pub config: DashboardConfig,
}

impl AppState {
    /// Create state backed by the CRM configured in the environment.
    pub fn new(config_path: impl AsRef<Path>) -> Result<Self> {
        let config = DashboardConfig::load(config_path)?;
        let client = HubSpotClient::new(CrmConfig::from_env())?;

        Ok(Self::with_source(Arc::new(client), config))
    }

    pub fn with_source(source: Arc<dyn DealSource>, config: DashboardConfig) -> Self {
        Self { source, config }
    }

    /// Read the boundary file. Any failure is logged and yields an empty
    /// collection, so the map simply shows no country overlay.
    pub async fn load_boundaries(&self) -> BoundaryCollection {
        let path = &self.config.boundaries_path;

        match read_boundaries(path).await {
            Ok(collection) => collection,
            Err(e) => {
                tracing::error!("Failed to load boundaries {:?}: {}", path, e);
                BoundaryCollection::default()
            }
        }
    }
}

/// Read and decode a boundary GeoJSON file.
pub async fn read_boundaries(path: impl AsRef<Path>) -> DealMapResult<BoundaryCollection> {
    let bytes = tokio::fs::read(path).await?;
    BoundaryCollection::from_slice(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealmap_common::DealMapError;
    use test_utils::{boundary_fixture_path, temp_file_with};

    #[tokio::test]
    async fn test_read_boundaries_fixture() {
        let collection = read_boundaries(boundary_fixture_path()).await.unwrap();
        assert!(collection.find("France").is_some());
    }

    #[tokio::test]
    async fn test_missing_boundary_file_is_io_error() {
        let err = read_boundaries("/nonexistent/countries.geojson")
            .await
            .unwrap_err();
        assert!(matches!(err, DealMapError::Io(_)));
    }

    #[tokio::test]
    async fn test_malformed_boundary_file_is_decode_error() {
        let file = temp_file_with("{\"type\": \"Feature\"}");
        let err = read_boundaries(file.path()).await.unwrap_err();
        assert!(matches!(err, DealMapError::BoundaryDecode(_)));
    }
}
