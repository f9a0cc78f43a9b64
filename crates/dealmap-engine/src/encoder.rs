//! Cluster icon sizing.
//!
//! Cluster size grows with the logarithm of the cluster's total power so a
//! few very large projects do not dwarf clusters of many small ones:
//!
//! ```text
//! size = clamp(base_size + multiplier * ln(total_mw + 1), min_size, max_size)
//! ```

use dealmap_common::{DealMapError, DealMapResult, Project};
use serde::{Deserialize, Serialize};

/// Configuration path reported when a style is rejected.
pub const CLUSTER_STYLE_FIELD: &str = "engine.cluster_style";

fn invalid_style(message: String) -> DealMapError {
    DealMapError::InvalidConfig {
        field: CLUSTER_STYLE_FIELD.to_string(),
        message,
    }
}

/// Parameters of the logarithmic size scale, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterStyle {
    pub base_size: f64,
    pub multiplier: f64,
    pub min_size: f64,
    pub max_size: f64,
}

impl Default for ClusterStyle {
    fn default() -> Self {
        Self {
            base_size: 20.0,
            multiplier: 5.0,
            min_size: 10.0,
            max_size: 50.0,
        }
    }
}

/// Visual encoding of one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterIcon {
    /// Icon diameter in pixels.
    pub size: f64,
    /// Total power rounded to an integer.
    pub label: String,
    pub total_mw: f64,
    pub count: usize,
}

impl ClusterStyle {
    /// Check that the scale is usable. Reports the first problem found.
    pub fn validate(&self) -> DealMapResult<()> {
        let fields = [
            ("base_size", self.base_size),
            ("multiplier", self.multiplier),
            ("min_size", self.min_size),
            ("max_size", self.max_size),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid_style(format!("{} must be a finite number", name)));
        }
        if self.min_size > self.max_size {
            return Err(invalid_style(format!(
                "min_size ({}) is larger than max_size ({})",
                self.min_size, self.max_size
            )));
        }
        Ok(())
    }

    /// Icon size for a total power in MWp. Negative totals are treated as 0.
    pub fn size_for_power(&self, total_mw: f64) -> f64 {
        let power = if total_mw.is_finite() { total_mw.max(0.0) } else { 0.0 };
        let size = self.base_size + self.multiplier * (power + 1.0).ln();
        // Not `clamp`: an unvalidated style may have min_size > max_size.
        size.max(self.min_size).min(self.max_size)
    }

    /// Encode the set of projects a cluster currently holds.
    pub fn encode<'a, I>(&self, projects: I) -> ClusterIcon
    where
        I: IntoIterator<Item = &'a Project>,
    {
        let (total_mw, count) = projects
            .into_iter()
            .fold((0.0, 0), |(sum, n), p| (sum + p.power_mw(), n + 1));

        self.encode_total(total_mw, count)
    }

    /// Encode a cluster from its precomputed total.
    pub fn encode_total(&self, total_mw: f64, count: usize) -> ClusterIcon {
        ClusterIcon {
            size: self.size_for_power(total_mw),
            label: format!("{}", total_mw.round() as i64),
            total_mw,
            count,
        }
    }
}
