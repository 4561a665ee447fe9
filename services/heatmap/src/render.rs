//! Chart rendering shared by the CLI and the server.

use std::time::Instant;

use chrono::{DateTime, Utc};
use metrics::histogram;
use serde::Serialize;
use tracing::{debug, instrument};

use heatmap_common::{ChartConfig, Dataset, HeatmapResult};
use renderer::svg::write_svg;
use renderer::{Chart, HostDocument};

/// Summary of the dataset behind a rendered chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub base_temperature: f64,
    pub records: usize,
    pub first_year: i32,
    pub last_year: i32,
    /// Minimum and maximum absolute temperature
    pub color_domain: (f64, f64),
    pub description: String,
    pub rendered_at: DateTime<Utc>,
}

/// A complete render: SVG plus the host page with the SVG mounted.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub summary: DatasetSummary,
    pub svg: String,
    pub page: String,
}

/// Build the chart, write it as SVG and mount it into `host`.
#[instrument(skip_all, fields(records = dataset.len()))]
pub fn render_chart(
    dataset: &Dataset,
    config: &ChartConfig,
    host: &HostDocument,
) -> HeatmapResult<RenderedChart> {
    let started = Instant::now();

    let chart = Chart::build(dataset, config)?;
    let svg = write_svg(&chart);
    let page = host.mount(&svg, &chart.description);

    let elapsed = started.elapsed().as_secs_f64();
    histogram!("heatmap_render_seconds").record(elapsed);
    debug!(cells = chart.cells.len(), svg_bytes = svg.len(), elapsed, "Rendered chart");

    let (first_year, last_year) = dataset.year_range();
    Ok(RenderedChart {
        summary: DatasetSummary {
            base_temperature: dataset.base_temperature(),
            records: dataset.len(),
            first_year,
            last_year,
            color_domain: chart.color_domain,
            description: chart.description,
            rendered_at: Utc::now(),
        },
        svg,
        page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::century_dataset;

    #[test]
    fn test_render_chart_summary() {
        let host = HostDocument::default_template().unwrap();
        let rendered = render_chart(&century_dataset(), &ChartConfig::default(), &host).unwrap();

        assert_eq!(rendered.summary.records, 3);
        assert_eq!(rendered.summary.first_year, 1900);
        assert_eq!(rendered.summary.last_year, 2000);
        assert_eq!(rendered.summary.color_domain, (7.0, 9.0));
        assert!(rendered.page.contains(&rendered.svg));
    }
}
