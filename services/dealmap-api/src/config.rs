//! Service configuration.
//!
//! Two sources: the dashboard YAML file (engine switches, cluster scale,
//! boundary file) and the environment (CRM credentials and endpoint).

use anyhow::{Context, Result};
use dealmap_common::DealMapError;
use dealmap_engine::EngineOptions;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Default CRM API root.
pub const DEFAULT_CRM_BASE_URL: &str = "https://api.hubapi.com";

/// Default page size of the deal list request.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Dashboard configuration loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Intake filtering, lost-deal handling and clustering switches.
    pub engine: EngineOptions,

    /// Country boundary GeoJSON file.
    pub boundaries_path: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            engine: EngineOptions::default(),
            boundaries_path: PathBuf::from("public/data/countries.geojson"),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a YAML file. A missing file yields the
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                "Dashboard config {} does not exist, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {:?}", path))?;

        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse dashboard config: {:?}", path))?;

        config.validate()?;

        tracing::info!(
            pipeline = ?config.engine.pipeline,
            hide_lost = config.engine.hide_lost,
            clustering = config.engine.clustering,
            "Loaded dashboard config from {:?}",
            path
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DealMapError> {
        self.engine.cluster_style.validate()?;

        if let Some(pipeline) = &self.engine.pipeline {
            if pipeline.trim().is_empty() {
                return Err(DealMapError::InvalidConfig {
                    field: "engine.pipeline".to_string(),
                    message: "must not be blank; omit it to keep every pipeline".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// CRM access settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CrmConfig {
    /// Private app access token. Requests fail without it.
    pub access_token: Option<String>,

    /// API root, overridable for testing against a stub.
    pub base_url: String,

    /// Deals requested per page.
    pub limit: u32,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: DEFAULT_CRM_BASE_URL.to_string(),
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl CrmConfig {
    /// Load from `HUBSPOT_ACCESS_TOKEN`, `HUBSPOT_BASE_URL` and
    /// `HUBSPOT_PAGE_LIMIT`.
    pub fn from_env() -> Self {
        let access_token = env::var("HUBSPOT_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let base_url =
            env::var("HUBSPOT_BASE_URL").unwrap_or_else(|_| DEFAULT_CRM_BASE_URL.to_string());

        let limit = env::var("HUBSPOT_PAGE_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PAGE_LIMIT);

        if access_token.is_none() {
            tracing::warn!("HUBSPOT_ACCESS_TOKEN is not set, deal requests will fail");
        }

        Self {
            access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
            limit,
        }
    }
}
