//! Writing a rendered chart to disk for `heatmap render`.
//!
//! Every requested artifact is produced in memory first, so a failed
//! rasterization leaves no files behind.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use renderer::raster::rasterize;

use crate::render::RenderedChart;

/// Where each artifact goes. The SVG is always written.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub svg: PathBuf,
    pub png: Option<PathBuf>,
    pub html: Option<PathBuf>,
    /// PNG scale factor
    pub scale: f32,
}

/// File contents ready to be written, in write order.
#[derive(Debug, Clone)]
pub struct RenderOutputs {
    pub files: Vec<(PathBuf, Vec<u8>)>,
}

impl RenderOutputs {
    /// Build every requested artifact. Rasterization runs on the blocking pool.
    pub async fn produce(rendered: &RenderedChart, paths: &OutputPaths) -> Result<Self> {
        let mut files = vec![(paths.svg.clone(), rendered.svg.clone().into_bytes())];

        if let Some(path) = &paths.html {
            files.push((path.clone(), rendered.page.clone().into_bytes()));
        }

        if let Some(path) = &paths.png {
            let svg = rendered.svg.clone();
            let scale = paths.scale;
            let bytes = tokio::task::spawn_blocking(move || rasterize(&svg, scale))
                .await
                .context("PNG rasterization task failed")??;
            files.push((path.clone(), bytes));
        }

        Ok(Self { files })
    }

    pub async fn write(&self) -> Result<()> {
        for (path, bytes) in &self.files {
            tokio::fs::write(path, bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = bytes.len(), "Wrote output");
        }
        Ok(())
    }
}

/// Produce all artifacts, then write them.
pub async fn write_outputs(rendered: &RenderedChart, paths: &OutputPaths) -> Result<()> {
    let outputs = RenderOutputs::produce(rendered, paths).await?;
    outputs.write().await
}
