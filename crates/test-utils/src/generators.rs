//! Synthetic dataset generators.
//!
//! Produce deterministic monthly series for tests that need realistic
//! volume, such as the full 1753-2015 record used in benchmarks.

use heatmap_common::{Dataset, MeasurementRecord};

/// Generate twelve records per year for `first_year..=last_year`.
///
/// Variance follows a seasonal sine plus a slow warming trend, so values
/// span a few degrees either side of zero without any randomness.
pub fn generate_monthly_records(first_year: i32, last_year: i32) -> Vec<MeasurementRecord> {
    let span = (last_year - first_year).max(1) as f64;

    (first_year..=last_year)
        .flat_map(|year| {
            (1..=12u32).map(move |month| {
                let seasonal = ((month as f64 - 1.0) / 12.0 * std::f64::consts::TAU).sin();
                let trend = (year - first_year) as f64 / span * 2.0 - 1.0;
                let wobble = ((year as f64 * 0.37 + month as f64 * 1.3).sin()) * 0.5;
                let variance = (seasonal * 1.5 + trend + wobble) * 1000.0;
                MeasurementRecord::new(year, month, variance.round() / 1000.0)
            })
        })
        .collect()
}

/// Generate a full dataset over `first_year..=last_year`.
pub fn generate_dataset(base_temperature: f64, first_year: i32, last_year: i32) -> Dataset {
    Dataset::new(
        base_temperature,
        generate_monthly_records(first_year, last_year),
    )
    .expect("generated dataset is valid")
}

/// Dataset shaped like the real upstream record: 1753 through 2015.
pub fn full_record_dataset() -> Dataset {
    generate_dataset(8.66, 1753, 2015)
}
