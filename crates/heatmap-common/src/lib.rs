//! Common types and utilities shared across the heat map crates.

pub mod color;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;

pub use color::Color;
pub use config::{ChartConfig, ColorSampling};
pub use dataset::{Dataset, MeasurementRecord, RawDataset, RawRecord};
pub use error::{HeatmapError, HeatmapResult};
pub use format::{format_celsius, format_signed_celsius, precision};
