//! Error types for the heat map crates.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for loading, rendering and serving the heat map.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Data Errors ===
    #[error("Failed to load dataset: {0}")]
    DataLoad(String),

    #[error("Malformed dataset: {0}")]
    MalformedDataset(String),

    // === Rendering Errors ===
    #[error("Render target missing: #{0}")]
    RenderTargetMissing(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    // === Infrastructure Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl HeatmapError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            HeatmapError::DataLoad(_) => 502,
            HeatmapError::MalformedDataset(_) => 422,
            HeatmapError::RenderTargetMissing(_)
            | HeatmapError::Render(_)
            | HeatmapError::InvalidConfig(_)
            | HeatmapError::Io(_) => 500,
        }
    }

    /// Short machine-readable kind, used in logs and JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            HeatmapError::DataLoad(_) => "DataLoadError",
            HeatmapError::MalformedDataset(_) => "MalformedDatasetError",
            HeatmapError::RenderTargetMissing(_) => "RenderTargetMissing",
            HeatmapError::Render(_) => "RenderError",
            HeatmapError::InvalidConfig(_) => "InvalidConfig",
            HeatmapError::Io(_) => "IoError",
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for HeatmapError {
    fn from(err: std::io::Error) -> Self {
        HeatmapError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        HeatmapError::DataLoad(format!("JSON error: {}", err))
    }
}
