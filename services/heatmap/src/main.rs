//! Temperature heat map CLI.
//!
//! - `heatmap render` loads the dataset once and writes SVG, PNG and/or HTML
//! - `heatmap serve` runs the HTTP server with on-demand refresh

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use heatmap::config::AppConfig;
use heatmap::server;
use heatmap::{render_chart, write_outputs, AppState, DataLoader, DataSource, OutputPaths};
use renderer::HostDocument;

#[derive(Parser, Debug)]
#[command(name = "heatmap")]
#[command(about = "Monthly global temperature heat map")]
struct Cli {
    /// Config file (YAML); defaults to config/heatmap.yaml when present
    #[arg(long, global = true, env = "HEATMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart to files
    Render {
        /// Read the dataset from a local JSON file (takes precedence over --url)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Fetch the dataset from this URL instead of the configured one
        #[arg(long, env = "HEATMAP_DATA_URL")]
        url: Option<String>,

        /// SVG output path
        #[arg(short, long, default_value = "chart.svg")]
        output: PathBuf,

        /// Also write a PNG
        #[arg(long)]
        png: Option<PathBuf>,

        /// Also write the host page with the chart mounted
        #[arg(long)]
        html: Option<PathBuf>,

        /// Host page template (must contain #holder, #description and #tooltip)
        #[arg(long)]
        host_template: Option<PathBuf>,

        /// PNG scale factor
        #[arg(long, default_value = "1.0")]
        scale: f32,
    },

    /// Serve the chart over HTTP
    Serve {
        /// Listen port
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        /// Listen address
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Fetch the dataset from this URL instead of the configured one
        #[arg(long, env = "HEATMAP_DATA_URL")]
        url: Option<String>,

        /// Serve a local JSON file instead of fetching
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);
    if cli.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let config = AppConfig::load(cli.config.as_deref())?;

    let result = match cli.command {
        Command::Render {
            input,
            url,
            output,
            png,
            html,
            host_template,
            scale,
        } => {
            let source = select_source(&config, input, url);
            let template = host_template.or_else(|| config.host_template.clone());
            let paths = OutputPaths {
                svg: output,
                png,
                html,
                scale,
            };
            run_render(&config, source, &paths, template).await
        }
        Command::Serve {
            port,
            host,
            url,
            input,
        } => {
            let source = select_source(&config, input, url);
            let port = port.unwrap_or(config.server.port);
            let host = host.unwrap_or_else(|| config.server.host.clone());
            run_serve(&config, source, &host, port).await
        }
    };

    if let Err(e) = &result {
        error!(error = %e, "heatmap failed");
    }
    result
}

fn select_source(config: &AppConfig, input: Option<PathBuf>, url: Option<String>) -> DataSource {
    match (input, url) {
        (Some(path), _) => DataSource::File(path),
        (None, Some(url)) => DataSource::Url(url),
        (None, None) => DataSource::Url(config.source.url.clone()),
    }
}

fn load_host(template: Option<PathBuf>) -> Result<HostDocument> {
    match template {
        Some(path) => {
            let html = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read host template {}", path.display()))?;
            Ok(HostDocument::parse(html)?)
        }
        None => Ok(HostDocument::default_template()?),
    }
}

async fn run_render(
    config: &AppConfig,
    source: DataSource,
    paths: &OutputPaths,
    host_template: Option<PathBuf>,
) -> Result<()> {
    let host = load_host(host_template)?;
    let loader = DataLoader::new(config.source.timeout(), &config.source.user_agent)?;

    let dataset = loader.load(&source).await?;
    let rendered = render_chart(&dataset, &config.chart, &host)?;

    write_outputs(&rendered, paths).await?;

    info!(
        records = rendered.summary.records,
        first_year = rendered.summary.first_year,
        last_year = rendered.summary.last_year,
        "Render complete"
    );
    Ok(())
}

async fn run_serve(config: &AppConfig, source: DataSource, host: &str, port: u16) -> Result<()> {
    // Initialize Prometheus metrics exporter
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics exporter initialized");

    let host_doc = load_host(config.host_template.clone())?;
    let loader = DataLoader::new(config.source.timeout(), &config.source.user_agent)?;
    let state = Arc::new(AppState::new(
        loader,
        source,
        config.chart.clone(),
        host_doc,
        Some(prometheus_handle),
    ));

    // Initial load runs in the background; chart endpoints answer 503 until it lands.
    let initial = state.clone();
    tokio::spawn(async move {
        if let Err(e) = initial.refresh().await {
            error!(error = %e, "Initial dataset load failed");
        }
    });

    info!("Starting heat map server");
    server::run_server(state, host, port).await
}
