//! Dataset loading from an HTTP endpoint or a local file.
//!
//! One request per load, no retries. Transport failures, non-200 responses
//! and unparseable bodies are `DataLoad` errors; a payload that parses but
//! breaks the dataset contract is `MalformedDataset`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use metrics::counter;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument, warn};

use heatmap_common::{Dataset, HeatmapError, HeatmapResult};

/// Where to read the dataset from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    fn kind(&self) -> &'static str {
        match self {
            DataSource::Url(_) => "url",
            DataSource::File(_) => "file",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches and validates datasets.
#[derive(Debug, Clone)]
pub struct DataLoader {
    client: Client,
}

impl DataLoader {
    pub fn new(timeout: Duration, user_agent: &str) -> HeatmapResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(user_agent)
            .build()
            .map_err(|e| HeatmapError::DataLoad(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Load and validate a dataset.
    #[instrument(skip(self, source), fields(source = %source))]
    pub async fn load(&self, source: &DataSource) -> HeatmapResult<Dataset> {
        counter!("heatmap_fetch_total", "source" => source.kind()).increment(1);

        let result = match source {
            DataSource::Url(url) => self.fetch_url(url).await,
            DataSource::File(path) => read_file(path).await,
        }
        .and_then(|body| Dataset::from_json(&body));

        match &result {
            Ok(dataset) => {
                let (first, last) = dataset.year_range();
                info!(
                    records = dataset.len(),
                    base_temperature = dataset.base_temperature(),
                    first_year = first,
                    last_year = last,
                    "Dataset loaded"
                );
            }
            Err(e) => {
                counter!("heatmap_fetch_errors_total", "kind" => e.kind()).increment(1);
                warn!(error = %e, "Dataset load failed");
            }
        }

        result
    }

    async fn fetch_url(&self, url: &str) -> HeatmapResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HeatmapError::DataLoad(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(HeatmapError::DataLoad(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| HeatmapError::DataLoad(format!("failed to read body: {}", e)))?;

        debug!(bytes = body.len(), "Fetched dataset body");
        Ok(body)
    }
}

async fn read_file(path: &Path) -> HeatmapResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| HeatmapError::DataLoad(format!("cannot read {}: {}", path.display(), e)))
}
