//! Hover tooltip text for a single cell.

use heatmap_common::{format_celsius, format_signed_celsius, ChartConfig, MeasurementRecord};

/// The three tooltip lines for one measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    /// `"1900 - January"`
    pub heading: String,
    /// Absolute temperature, e.g. `"7.3°C"`
    pub temperature: String,
    /// Signed variance, e.g. `"+0.4°C"` or `"-1.4°C"`
    pub variance: String,
}

impl Tooltip {
    pub fn for_record(
        record: &MeasurementRecord,
        base_temperature: f64,
        config: &ChartConfig,
    ) -> Self {
        Self {
            heading: format!("{} - {}", record.year, config.month_name(record.month)),
            temperature: format_celsius(base_temperature + record.variance),
            variance: format_signed_celsius(record.variance),
        }
    }

    /// Lines joined by `<br>`, for HTML tooltips.
    pub fn to_html(&self) -> String {
        self.join("<br>")
    }

    /// Lines joined by newlines, for SVG `<title>` elements.
    pub fn to_plain(&self) -> String {
        self.join("\n")
    }

    fn join(&self, separator: &str) -> String {
        [
            self.heading.as_str(),
            self.temperature.as_str(),
            self.variance.as_str(),
        ]
        .join(separator)
    }
}

/// HTML tooltip content for a record: heading, temperature and variance.
pub fn tooltip_content(
    record: &MeasurementRecord,
    base_temperature: f64,
    config: &ChartConfig,
) -> String {
    Tooltip::for_record(record, base_temperature, config).to_html()
}
