//! Common test fixtures for heat map tests.
//!
//! Small datasets covering the layout scenarios the renderer has to get
//! right: a single year, a span of years, a single record.

use heatmap_common::{Dataset, MeasurementRecord};

/// Base temperature shared by most fixtures.
pub const BASE_TEMPERATURE: f64 = 8.0;

/// Upstream payload in wire format with three records.
pub const SAMPLE_JSON: &str = r#"{
  "baseTemperature": 8.66,
  "monthlyVariance": [
    { "year": 1753, "month": 1, "variance": -1.366 },
    { "year": 1753, "month": 2, "variance": -2.223 },
    { "year": 1754, "month": 3, "variance": 0.211 }
  ]
}"#;

/// Two records in the same year: 6.5°C in January and 10.0°C in June.
pub fn single_year_dataset() -> Dataset {
    build(
        BASE_TEMPERATURE,
        vec![
            MeasurementRecord::new(2000, 1, -1.5),
            MeasurementRecord::new(2000, 6, 2.0),
        ],
    )
}

/// Three records spread over 1900-2000, one in January, June and December.
pub fn century_dataset() -> Dataset {
    build(
        BASE_TEMPERATURE,
        vec![
            MeasurementRecord::new(1900, 1, -1.0),
            MeasurementRecord::new(1950, 6, 0.0),
            MeasurementRecord::new(2000, 12, 1.0),
        ],
    )
}

/// A dataset with exactly one record, so every extent is degenerate.
pub fn single_record_dataset() -> Dataset {
    build(BASE_TEMPERATURE, vec![MeasurementRecord::new(1990, 4, 0.5)])
}

/// Serialize a base temperature and records into the upstream wire format.
pub fn dataset_json(base_temperature: f64, records: &[(i64, i64, f64)]) -> String {
    let monthly: Vec<serde_json::Value> = records
        .iter()
        .map(|&(year, month, variance)| {
            serde_json::json!({ "year": year, "month": month, "variance": variance })
        })
        .collect();

    serde_json::json!({
        "baseTemperature": base_temperature,
        "monthlyVariance": monthly,
    })
    .to_string()
}

fn build(base: f64, records: Vec<MeasurementRecord>) -> Dataset {
    Dataset::new(base, records).expect("fixture dataset is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_valid() {
        assert_eq!(single_year_dataset().len(), 2);
        assert_eq!(century_dataset().len(), 3);
        assert_eq!(single_record_dataset().len(), 1);
        assert_eq!(Dataset::from_json(SAMPLE_JSON).unwrap().len(), 3);
    }

    #[test]
    fn test_dataset_json_roundtrips() {
        let json = dataset_json(9.0, &[(2001, 2, 0.25)]);
        let dataset = Dataset::from_json(&json).unwrap();
        assert_eq!(dataset.base_temperature(), 9.0);
        assert_eq!(dataset.records()[0], MeasurementRecord::new(2001, 2, 0.25));
    }
}
