//! Scales mapping data values to pixel positions and palette colors.
//!
//! All scales are pure values built once from a dataset. A degenerate
//! continuous domain (start == end) maps every input to the middle of the
//! range instead of dividing by zero.

use chrono::NaiveDate;

use heatmap_common::{HeatmapError, HeatmapResult};

/// Continuous linear mapping from `domain` to `range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value into the range. Values outside the domain
    /// extrapolate linearly.
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Map a range value back into the domain.
    pub fn invert(&self, position: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (position - r0) / span * (d1 - d0)
    }
}

/// Linear scale over elapsed time between two calendar dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: NaiveDate,
    end: NaiveDate,
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        let (start, end) = domain;
        let inner = LinearScale::new((0.0, days_between(start, end)), range);
        Self { start, end, inner }
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    pub fn scale(&self, date: NaiveDate) -> f64 {
        self.inner.scale(days_between(self.start, date))
    }
}

fn days_between(from: NaiveDate, to: NaiveDate) -> f64 {
    to.signed_duration_since(from).num_days() as f64
}

/// Discrete scale whose bucket boundaries are quantiles of a sample set.
///
/// With `n` output values there are `n - 1` thresholds at p = 1/n, 2/n, ...
/// computed by linear interpolation between order statistics. An input maps
/// to the output at the number of thresholds less than or equal to it, so
/// the mapping is monotonic non-decreasing.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileScale<T> {
    samples: Vec<f64>,
    thresholds: Vec<f64>,
    range: Vec<T>,
}

impl<T> QuantileScale<T> {
    /// Build from unsorted samples. NaN samples are ignored.
    pub fn new(samples: &[f64], range: Vec<T>) -> HeatmapResult<Self> {
        if range.is_empty() {
            return Err(HeatmapError::Render(
                "quantile scale needs at least one output value".to_string(),
            ));
        }

        let mut sorted: Vec<f64> = samples.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return Err(HeatmapError::Render(
                "quantile scale needs at least one sample".to_string(),
            ));
        }
        sorted.sort_by(f64::total_cmp);

        let n = range.len();
        let thresholds = (1..n)
            .map(|i| quantile_sorted(&sorted, i as f64 / n as f64))
            .collect();

        Ok(Self {
            samples: sorted,
            thresholds,
            range,
        })
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn range(&self) -> &[T] {
        &self.range
    }

    /// Smallest and largest sample.
    pub fn domain(&self) -> (f64, f64) {
        // `new` rejects empty sample sets.
        let first = self.samples.first().copied().unwrap_or(f64::NAN);
        let last = self.samples.last().copied().unwrap_or(f64::NAN);
        (first, last)
    }

    /// Index of the bucket a value falls into, or `None` for NaN.
    pub fn bucket_index(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        Some(self.thresholds.partition_point(|t| *t <= value))
    }

    /// Output value for `value`, or `None` for NaN.
    pub fn scale(&self, value: f64) -> Option<&T> {
        self.bucket_index(value).and_then(|idx| self.range.get(idx))
    }

    /// Input extent `[lower, upper)` covered by the bucket at `index`.
    pub fn invert_extent(&self, index: usize) -> Option<(f64, f64)> {
        if index >= self.range.len() {
            return None;
        }
        let (min, max) = self.domain();
        let lower = if index == 0 {
            min
        } else {
            self.thresholds[index - 1]
        };
        let upper = self.thresholds.get(index).copied().unwrap_or(max);
        Some((lower, upper))
    }
}

/// Quantile of an ascending slice with linear interpolation (R-7).
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if p <= 0.0 || n < 2 {
        return sorted[0];
    }
    if p >= 1.0 {
        return sorted[n - 1];
    }

    let i = (n - 1) as f64 * p;
    let i0 = i.floor() as usize;
    let v0 = sorted[i0];
    let v1 = sorted[(i0 + 1).min(n - 1)];
    v0 + (v1 - v0) * (i - i0 as f64)
}
