//! Color legend: one swatch per palette entry across the temperature extent.

use heatmap_common::format::format_tick;
use heatmap_common::{Color, HeatmapError, HeatmapResult};

use crate::scale::{LinearScale, QuantileScale};

/// One legend swatch covering `[lower_bound, upper_bound)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendBucket {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub color: Color,
    /// Swatch offset from the legend origin
    pub x: f64,
    pub width: f64,
}

/// A labelled boundary between two swatches.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendTick {
    pub value: f64,
    pub x: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub buckets: Vec<LegendBucket>,
    pub ticks: Vec<LegendTick>,
    pub width: f64,
    pub height: f64,
}

impl Legend {
    /// Split `[min, max]` into one equal-width bucket per color in the scale's
    /// palette.
    ///
    /// Swatches are filled with the color the scale assigns to the bucket
    /// midpoint; with extent sampling that is exactly the palette entry for
    /// the bucket. Boundaries after the first get a one-decimal tick label.
    /// Fails when the scale has no color for a bucket, e.g. a NaN domain.
    pub fn build(
        domain: (f64, f64),
        color_scale: &QuantileScale<Color>,
        width: f64,
        height: f64,
    ) -> HeatmapResult<Self> {
        let (min, max) = domain;
        let count = color_scale.range().len();
        let step = (max - min) / count as f64;
        let legend_scale = LinearScale::new(domain, (0.0, width));

        let boundaries: Vec<f64> = (0..count).map(|i| min + i as f64 * step).collect();

        let buckets = boundaries
            .iter()
            .enumerate()
            .map(|(i, &lower)| {
                let is_last = i + 1 == count;
                let upper = if is_last { max } else { boundaries[i + 1] };
                let x = legend_scale.scale(lower);
                let end = if is_last { width } else { legend_scale.scale(upper) };
                let midpoint = (lower + upper) / 2.0;
                let color = color_scale.scale(midpoint).copied().ok_or_else(|| {
                    HeatmapError::Render(format!(
                        "no legend color for bucket {} (midpoint {})",
                        i, midpoint
                    ))
                })?;

                Ok(LegendBucket {
                    lower_bound: lower,
                    upper_bound: upper,
                    color,
                    x,
                    width: (end - x).max(0.0),
                })
            })
            .collect::<HeatmapResult<Vec<_>>>()?;

        let ticks = boundaries
            .iter()
            .skip(1)
            .map(|&value| LegendTick {
                value,
                x: legend_scale.scale(value),
                label: format_tick(value),
            })
            .collect();

        Ok(Self {
            buckets,
            ticks,
            width,
            height,
        })
    }
}
