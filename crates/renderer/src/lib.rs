//! Chart rendering for the monthly temperature heat map.
//!
//! The pipeline turns a validated [`Dataset`](heatmap_common::Dataset) into a
//! [`Chart`]:
//! - Scales (time, linear, quantile color)
//! - Per-cell geometry and fill
//! - Axis ticks and color legend
//! - Hover tooltip text
//!
//! and writes it out as SVG, PNG or a mounted HTML page.

pub mod axis;
pub mod chart;
pub mod document;
pub mod legend;
pub mod png;
pub mod raster;
pub mod scale;
pub mod svg;
pub mod tooltip;

pub use chart::{Cell, Chart};
pub use document::HostDocument;
pub use legend::{Legend, LegendBucket};
pub use scale::{LinearScale, QuantileScale, TimeScale};
pub use tooltip::{tooltip_content, Tooltip};
