//! Temperature heat map service.
//!
//! Loads the monthly variance dataset, renders it with the `renderer` crate
//! and either writes the result to disk or serves it over HTTP.

pub mod config;
pub mod fetch;
pub mod output;
pub mod render;
pub mod server;
pub mod state;

pub use config::AppConfig;
pub use fetch::{DataLoader, DataSource};
pub use output::{write_outputs, OutputPaths, RenderOutputs};
pub use render::{render_chart, DatasetSummary, RenderedChart};
pub use state::{AppState, RefreshOutcome};
