//! HTTP server for the heat map.
//!
//! Provides endpoints for:
//! - `GET /` - Host page with the chart mounted
//! - `GET /chart.svg` - Standalone SVG
//! - `GET /chart.png` - Rasterized chart
//! - `GET /api/dataset` - Summary of the loaded dataset
//! - `POST /api/refresh` - Refetch the dataset and rebuild the chart
//! - `GET /health` - Health check
//! - `GET /metrics` - Prometheus metrics

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use heatmap_common::HeatmapError;
use renderer::raster::rasterize;

use crate::render::{DatasetSummary, RenderedChart};
use crate::state::{AppState, RefreshOutcome};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub chart_loaded: bool,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<DatasetSummary>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

/// Error wrapper that renders a `HeatmapError` as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub HeatmapError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            error: self.0.to_string(),
            kind: self.0.kind(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<HeatmapError> for ApiError {
    fn from(err: HeatmapError) -> Self {
        Self(err)
    }
}

// ============================================================================
// Router
// ============================================================================

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/chart.svg", get(svg_handler))
        .route("/chart.png", get(png_handler))
        .route("/api/dataset", get(dataset_handler))
        .route("/api/refresh", post(refresh_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

/// Bind and serve until the process is stopped.
pub async fn run_server(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "Listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

fn not_ready() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: "chart has not been loaded yet".to_string(),
            kind: "NotReady",
        }),
    )
        .into_response()
}

async fn with_chart(
    state: &AppState,
    respond: impl FnOnce(Arc<RenderedChart>) -> Response,
) -> Response {
    match state.current().await {
        Some(chart) => respond(chart),
        None => not_ready(),
    }
}

/// GET / - Host page
async fn index_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    with_chart(&state, |chart| Html(chart.page.clone()).into_response()).await
}

/// GET /chart.svg
async fn svg_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    with_chart(&state, |chart| {
        ([(header::CONTENT_TYPE, "image/svg+xml")], chart.svg.clone()).into_response()
    })
    .await
}

/// GET /chart.png - rasterized on a blocking thread
async fn png_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let Some(chart) = state.current().await else {
        return not_ready();
    };

    let result = tokio::task::spawn_blocking(move || rasterize(&chart.svg, 1.0)).await;
    match result {
        Ok(Ok(png)) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Ok(Err(e)) => {
            error!(error = %e, "PNG rendering failed");
            ApiError(e).into_response()
        }
        Err(e) => {
            error!(error = %e, "PNG rendering task failed");
            ApiError(HeatmapError::Render(e.to_string())).into_response()
        }
    }
}

/// GET /api/dataset
async fn dataset_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    with_chart(&state, |chart| Json(chart.summary.clone()).into_response()).await
}

/// POST /api/refresh
async fn refresh_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let response = match state.refresh().await? {
        RefreshOutcome::Applied(chart) => (
            StatusCode::OK,
            Json(RefreshResponse {
                status: "applied",
                dataset: Some(chart.summary.clone()),
            }),
        ),
        RefreshOutcome::Superseded => (
            StatusCode::CONFLICT,
            Json(RefreshResponse {
                status: "superseded",
                dataset: None,
            }),
        ),
    };
    Ok(response.into_response())
}

/// GET /health
async fn health_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        chart_loaded: state.current().await.is_some(),
    })
}

/// GET /metrics - Prometheus text format
async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match &state.prometheus {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}
