//! Shared server state: the current chart and the refresh token guard.
//!
//! Each refresh takes a token from a monotonically increasing counter. When
//! the refresh finishes, its result is applied only if no newer refresh has
//! started in the meantime; otherwise it is discarded. A failed refresh
//! leaves the current chart untouched.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use heatmap_common::{ChartConfig, HeatmapResult};
use renderer::HostDocument;

use crate::fetch::{DataLoader, DataSource};
use crate::render::{render_chart, RenderedChart};

/// Result of a refresh that did not fail.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    Applied(Arc<RenderedChart>),
    /// A newer refresh started before this one finished
    Superseded,
}

pub struct AppState {
    loader: DataLoader,
    source: DataSource,
    chart_config: ChartConfig,
    host: HostDocument,
    current: RwLock<Option<Arc<RenderedChart>>>,
    latest_token: AtomicU64,
    /// Prometheus handle; `None` when no recorder is installed
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        loader: DataLoader,
        source: DataSource,
        chart_config: ChartConfig,
        host: HostDocument,
        prometheus: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            loader,
            source,
            chart_config,
            host,
            current: RwLock::new(None),
            latest_token: AtomicU64::new(0),
            prometheus,
        }
    }

    /// The chart currently being served, if any load has succeeded.
    pub async fn current(&self) -> Option<Arc<RenderedChart>> {
        self.current.read().await.clone()
    }

    /// Take the next request token.
    pub fn begin_refresh(&self) -> u64 {
        self.latest_token.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Install `rendered` unless a refresh newer than `token` has started.
    pub async fn apply(&self, token: u64, rendered: RenderedChart) -> RefreshOutcome {
        let mut current = self.current.write().await;
        let latest = self.latest_token.load(Ordering::SeqCst);
        if token != latest {
            counter!("heatmap_refresh_superseded_total").increment(1);
            info!(token, latest, "Discarding superseded refresh");
            return RefreshOutcome::Superseded;
        }

        let rendered = Arc::new(rendered);
        *current = Some(rendered.clone());
        RefreshOutcome::Applied(rendered)
    }

    /// Fetch the dataset, render it and install the result.
    ///
    /// Rendering happens outside the lock; the write side is only taken to
    /// swap in the finished chart.
    #[instrument(skip(self), fields(source = %self.source))]
    pub async fn refresh(&self) -> HeatmapResult<RefreshOutcome> {
        let token = self.begin_refresh();
        let dataset = self.loader.load(&self.source).await?;
        let rendered = render_chart(&dataset, &self.chart_config, &self.host)?;

        let outcome = self.apply(token, rendered).await;
        if let RefreshOutcome::Applied(chart) = &outcome {
            info!(token, records = chart.summary.records, "Chart refreshed");
        }
        Ok(outcome)
    }
}
