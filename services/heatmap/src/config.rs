//! Service configuration loaded from `config/heatmap.yaml`.
//!
//! Every section is optional. Command line flags (and their environment
//! variables) override values from the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use heatmap_common::{ChartConfig, HeatmapError, HeatmapResult};

/// Upstream dataset published by freeCodeCamp.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/global-temperature.json";

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config/heatmap.yaml";

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub server: ServerConfig,
    pub chart: ChartConfig,
    /// Host page the chart is mounted into; the built-in page when unset
    pub host_template: Option<PathBuf>,
}

/// Where the dataset comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATA_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!("temperature-heatmap/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl AppConfig {
    /// Parse a YAML config file and validate the chart section.
    pub fn from_file(path: impl AsRef<Path>) -> HeatmapResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            HeatmapError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml(&content)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> HeatmapResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| HeatmapError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise the default config file when it
    /// exists, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> HeatmapResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)
            }
            None => {
                info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> HeatmapResult<()> {
        if self.source.url.trim().is_empty() {
            return Err(HeatmapError::InvalidConfig(
                "source.url must not be empty".to_string(),
            ));
        }
        if self.source.timeout_secs == 0 {
            return Err(HeatmapError::InvalidConfig(
                "source.timeout_secs must be at least 1".to_string(),
            ));
        }
        self.chart.validate()
    }
}
