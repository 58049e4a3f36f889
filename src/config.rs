//! Dashboard settings, optionally loaded from `ecotech_dashboard.json`.

use crate::data::DEFAULT_SEED;
use crate::selection::Visualization;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "ecotech_dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// When the dataset is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataPolicy {
    /// Generate once, reuse for every display cycle.
    #[default]
    Cached,
    /// Generate again on every display cycle.
    RegeneratePerCycle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub seed: u64,
    pub data_policy: DataPolicy,
    /// Delay between globe animation frames.
    pub animation_interval_ms: u64,
    pub initial_visualization: Visualization,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            data_policy: DataPolicy::Cached,
            animation_interval_ms: 800,
            initial_visualization: Visualization::SalesFunnel,
        }
    }
}

impl DashboardSettings {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Settings from `path` if it exists; defaults when missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(settings) => {
                info!(path = %path.display(), "loaded dashboard settings");
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring dashboard settings");
                Self::default()
            }
        }
    }

    pub fn animation_interval_secs(&self) -> f64 {
        self.animation_interval_ms as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let s = DashboardSettings::from_json(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(s.seed, 7);
        assert_eq!(s.data_policy, DataPolicy::Cached);
        assert_eq!(s.animation_interval_ms, 800);
    }

    #[test]
    fn policy_and_visualization_parse() {
        let s = DashboardSettings::from_json(
            r#"{ "data_policy": "regenerate_per_cycle", "initial_visualization": "PolarWinds" }"#,
        )
        .unwrap();
        assert_eq!(s.data_policy, DataPolicy::RegeneratePerCycle);
        assert_eq!(s.initial_visualization, Visualization::PolarWinds);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            DashboardSettings::from_json("{ seed: }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let s = DashboardSettings::load_or_default(Path::new("does/not/exist.json"));
        assert_eq!(s, DashboardSettings::default());
    }
}
