//! Temperature dataset model and wire payload parsing.
//!
//! The upstream payload looks like:
//!
//! ```json
//! {
//!   "baseTemperature": 8.66,
//!   "monthlyVariance": [{ "year": 1753, "month": 1, "variance": -1.366 }]
//! }
//! ```
//!
//! [`RawDataset`] mirrors that shape. A [`Dataset`] can only be obtained by
//! validating a raw payload, so every `Dataset` value holds at least one
//! record and every month lies in `1..=12`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HeatmapError, HeatmapResult};

/// A single monthly measurement as it arrives on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawRecord {
    pub year: i64,
    pub month: i64,
    pub variance: f64,
}

/// The upstream JSON payload before validation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataset {
    pub base_temperature: f64,
    pub monthly_variance: Vec<RawRecord>,
}

impl RawDataset {
    /// Parse the upstream payload from a JSON string.
    pub fn from_json(json: &str) -> HeatmapResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One year/month temperature deviation from the base temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasurementRecord {
    pub year: i32,
    /// Month of year, 1 = January.
    pub month: u32,
    /// Deviation in °C from the dataset's base temperature.
    pub variance: f64,
}

impl MeasurementRecord {
    pub fn new(year: i32, month: u32, variance: f64) -> Self {
        Self {
            year,
            month,
            variance,
        }
    }

    /// First day of the record's month.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// January 1st of the record's year, used for cell placement.
    pub fn year_start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, 1, 1)
    }
}

/// A validated dataset: base temperature plus ordered monthly records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    base_temperature: f64,
    records: Vec<MeasurementRecord>,
}

impl Dataset {
    /// Build a dataset, rejecting empty record lists, months outside
    /// `1..=12`, unrepresentable dates and non-finite values.
    pub fn new(base_temperature: f64, records: Vec<MeasurementRecord>) -> HeatmapResult<Self> {
        if !base_temperature.is_finite() {
            return Err(HeatmapError::MalformedDataset(format!(
                "base temperature is not finite: {}",
                base_temperature
            )));
        }
        if records.is_empty() {
            return Err(HeatmapError::MalformedDataset(
                "dataset contains no records".to_string(),
            ));
        }

        for (idx, record) in records.iter().enumerate() {
            if !(1..=12).contains(&record.month) {
                return Err(HeatmapError::MalformedDataset(format!(
                    "record {} ({}): month {} out of range 1-12",
                    idx, record.year, record.month
                )));
            }
            if !record.variance.is_finite() {
                return Err(HeatmapError::MalformedDataset(format!(
                    "record {} ({}-{:02}): variance is not finite",
                    idx, record.year, record.month
                )));
            }
            if record.to_date().is_none() {
                return Err(HeatmapError::MalformedDataset(format!(
                    "record {}: year {} is not a representable date",
                    idx, record.year
                )));
            }
        }

        debug!(
            records = records.len(),
            base_temperature = base_temperature,
            "Validated dataset"
        );

        Ok(Self {
            base_temperature,
            records,
        })
    }

    /// Validate a raw wire payload.
    pub fn from_raw(raw: RawDataset) -> HeatmapResult<Self> {
        let records = raw
            .monthly_variance
            .into_iter()
            .enumerate()
            .map(|(idx, r)| {
                let year = i32::try_from(r.year).map_err(|_| {
                    HeatmapError::MalformedDataset(format!(
                        "record {}: year {} out of range",
                        idx, r.year
                    ))
                })?;
                let month = u32::try_from(r.month).map_err(|_| {
                    HeatmapError::MalformedDataset(format!(
                        "record {} ({}): month {} out of range 1-12",
                        idx, r.year, r.month
                    ))
                })?;
                Ok(MeasurementRecord::new(year, month, r.variance))
            })
            .collect::<HeatmapResult<Vec<_>>>()?;

        Self::new(raw.base_temperature, records)
    }

    /// Parse and validate a JSON payload in one step.
    pub fn from_json(json: &str) -> HeatmapResult<Self> {
        Self::from_raw(RawDataset::from_json(json)?)
    }

    pub fn base_temperature(&self) -> f64 {
        self.base_temperature
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a validated dataset; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Absolute temperature of a record: base temperature plus variance.
    pub fn absolute_temperature(&self, record: &MeasurementRecord) -> f64 {
        self.base_temperature + record.variance
    }

    /// Absolute temperatures of all records, in record order.
    pub fn temperatures(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| self.absolute_temperature(r))
            .collect()
    }

    /// Earliest and latest first-of-month dates.
    pub fn date_extent(&self) -> (NaiveDate, NaiveDate) {
        let mut dates = self.records.iter().filter_map(MeasurementRecord::to_date);
        // Validation guarantees at least one representable date.
        let first = dates.next().unwrap_or(NaiveDate::MIN);
        dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d)))
    }

    /// Minimum and maximum absolute temperature.
    pub fn temperature_extent(&self) -> (f64, f64) {
        self.records.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), r| {
                let t = self.absolute_temperature(r);
                (min.min(t), max.max(t))
            },
        )
    }

    /// First and last year covered by the dataset.
    pub fn year_range(&self) -> (i32, i32) {
        let (start, end) = self.date_extent();
        (start.year(), end.year())
    }
}
