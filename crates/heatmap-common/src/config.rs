//! Chart configuration.
//!
//! Dimensions, palette and month names are plain values handed to the
//! renderer. Defaults reproduce the classic 1500x600 global temperature
//! chart with an 11-step diverging blue/red palette.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{HeatmapError, HeatmapResult};

/// Diverging palette, dark blue (cold) to dark red (warm).
pub const DEFAULT_PALETTE: [Color; 11] = [
    Color::new(0x31, 0x36, 0x95),
    Color::new(0x45, 0x75, 0xb4),
    Color::new(0x74, 0xad, 0xd1),
    Color::new(0xab, 0xd9, 0xe9),
    Color::new(0xe0, 0xf3, 0xf8),
    Color::new(0xff, 0xff, 0xbf),
    Color::new(0xfe, 0xe0, 0x90),
    Color::new(0xfd, 0xae, 0x61),
    Color::new(0xf4, 0x6d, 0x43),
    Color::new(0xd7, 0x30, 0x27),
    Color::new(0xa5, 0x00, 0x26),
];

pub const DEFAULT_MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Which samples the quantile color scale is built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSampling {
    /// Only the `[min, max]` temperature extent; buckets are equal width.
    #[default]
    Extent,
    /// Every record's absolute temperature; buckets hold equal populations.
    Records,
}

/// Layout and styling for one rendered chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Total SVG width in pixels
    pub width: f64,
    /// Total SVG height in pixels
    pub height: f64,
    /// Space around the plot area, on every side
    pub padding: f64,
    /// Fixed cell width; one bar per year regardless of the year span
    pub cell_width: f64,
    pub palette: Vec<Color>,
    pub month_names: Vec<String>,
    pub legend_width: f64,
    pub legend_height: f64,
    /// Interval between x-axis ticks, in years
    pub x_tick_years: u32,
    pub title: String,
    pub color_sampling: ColorSampling,
    /// Write `data-month` as 0-11 instead of 1-12
    pub zero_based_month_attr: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1500.0,
            height: 600.0,
            padding: 100.0,
            cell_width: 5.0,
            palette: DEFAULT_PALETTE.to_vec(),
            month_names: DEFAULT_MONTH_NAMES.iter().map(|m| m.to_string()).collect(),
            legend_width: 400.0,
            legend_height: 30.0,
            x_tick_years: 10,
            title: "Monthly Global Land-Surface Temperature".to_string(),
            color_sampling: ColorSampling::Extent,
            zero_based_month_attr: false,
        }
    }
}

impl ChartConfig {
    /// Load a chart configuration from a YAML or JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> HeatmapResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| HeatmapError::InvalidConfig(e.to_string()))?,
            _ => serde_yaml::from_str(&content)
                .map_err(|e| HeatmapError::InvalidConfig(e.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> HeatmapResult<()> {
        if self.palette.is_empty() {
            return Err(HeatmapError::InvalidConfig(
                "palette must contain at least one color".to_string(),
            ));
        }
        if self.month_names.len() != 12 {
            return Err(HeatmapError::InvalidConfig(format!(
                "expected 12 month names, got {}",
                self.month_names.len()
            )));
        }
        if !(self.width.is_finite() && self.height.is_finite() && self.padding.is_finite()) {
            return Err(HeatmapError::InvalidConfig(
                "dimensions must be finite".to_string(),
            ));
        }
        if self.plot_width() <= 0.0 || self.plot_height() <= 0.0 {
            return Err(HeatmapError::InvalidConfig(format!(
                "padding {} leaves no plot area in {}x{}",
                self.padding, self.width, self.height
            )));
        }
        if self.cell_width <= 0.0 || self.legend_width <= 0.0 || self.legend_height <= 0.0 {
            return Err(HeatmapError::InvalidConfig(
                "cell and legend sizes must be positive".to_string(),
            ));
        }
        if self.x_tick_years == 0 || i32::try_from(self.x_tick_years).is_err() {
            return Err(HeatmapError::InvalidConfig(format!(
                "x_tick_years must be between 1 and {}, got {}",
                i32::MAX,
                self.x_tick_years
            )));
        }
        Ok(())
    }

    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    /// Height of one month row.
    pub fn cell_height(&self) -> f64 {
        self.plot_height() / 12.0
    }

    /// Name of a 1-based month; out-of-range months yield an empty string.
    pub fn month_name(&self, month: u32) -> &str {
        month
            .checked_sub(1)
            .and_then(|idx| self.month_names.get(idx as usize))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ChartConfig::default();
        config.validate().unwrap();
        assert_eq!(config.palette.len(), 11);
        assert_eq!(config.cell_height(), 400.0 / 12.0);
        assert_eq!(config.month_name(1), "January");
        assert_eq!(config.month_name(12), "December");
        assert_eq!(config.month_name(0), "");
    }
}
