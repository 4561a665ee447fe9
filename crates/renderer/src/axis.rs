//! Axis tick generation for the year (x) and month (y) axes.

use chrono::{Datelike, NaiveDate};

use heatmap_common::ChartConfig;

use crate::scale::{LinearScale, TimeScale};

/// Which side of the plot an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel position along the axis
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orientation: AxisOrientation,
    /// Pixel extent of the axis line
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
}

impl Axis {
    /// Bottom axis with a tick on January 1st of every `every_years`-th year
    /// inside the time domain.
    pub fn years(scale: &TimeScale, every_years: u32) -> Self {
        let (start, end) = scale.domain();
        let every = i32::try_from(every_years.max(1)).unwrap_or(i32::MAX);

        let mut year = start.year().div_euclid(every) * every;
        if year < start.year() {
            year = year.saturating_add(every);
        }

        let mut ticks = Vec::new();
        while year <= end.year() {
            if let Some(date) = NaiveDate::from_ymd_opt(year, 1, 1) {
                if date >= start && date <= end {
                    ticks.push(Tick {
                        position: scale.scale(date),
                        label: year.to_string(),
                    });
                }
            }
            match year.checked_add(every) {
                Some(next) => year = next,
                None => break,
            }
        }

        Self {
            orientation: AxisOrientation::Bottom,
            range: scale.range(),
            ticks,
        }
    }

    /// Left axis with one tick per month, January at the top.
    pub fn months(scale: &LinearScale, config: &ChartConfig) -> Self {
        let ticks = (1..=12u32)
            .map(|month| Tick {
                position: scale.scale(month as f64),
                label: config.month_name(month).to_string(),
            })
            .collect();

        Self {
            orientation: AxisOrientation::Left,
            range: scale.range(),
            ticks,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.ticks.iter().map(|t| t.label.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn century_scale() -> TimeScale {
        let start = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2000, 12, 1).unwrap();
        TimeScale::new((start, end), (0.0, 1000.0))
    }

    #[test]
    fn test_decade_ticks() {
        let axis = Axis::years(&century_scale(), 10);
        assert_eq!(axis.ticks.len(), 11);
        assert_eq!(axis.labels().first(), Some(&"1900"));
        assert_eq!(axis.labels().last(), Some(&"2000"));
    }

    #[test]
    fn test_interval_wider_than_i32_does_not_overflow() {
        let axis = Axis::years(&century_scale(), u32::MAX);
        assert!(axis.ticks.is_empty());

        let axis = Axis::years(&century_scale(), i32::MAX as u32);
        assert!(axis.ticks.is_empty());
    }
}
