//! Tests for chart configuration loading and validation.

use std::io::Write;

use heatmap_common::{ChartConfig, Color, ColorSampling, HeatmapError};

#[test]
fn test_yaml_overrides_keep_defaults() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "width: 1200\nx_tick_years: 25\ncolor_sampling: records\npalette: ['#000000', '#ffffff']"
    )
    .unwrap();

    let config = ChartConfig::from_file(file.path()).unwrap();
    assert_eq!(config.width, 1200.0);
    assert_eq!(config.height, 600.0);
    assert_eq!(config.x_tick_years, 25);
    assert_eq!(config.color_sampling, ColorSampling::Records);
    assert_eq!(config.palette, vec![Color::BLACK, Color::WHITE]);
    assert_eq!(config.month_names.len(), 12);
}

#[test]
fn test_json_config() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"padding": 50, "cell_width": 3}}"#).unwrap();

    let config = ChartConfig::from_file(file.path()).unwrap();
    assert_eq!(config.padding, 50.0);
    assert_eq!(config.cell_width, 3.0);
}

#[test]
fn test_invalid_palette_color_rejected() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "palette: ['#12345']").unwrap();

    let err = ChartConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, HeatmapError::InvalidConfig(_)), "got {:?}", err);
}

#[test]
fn test_validation_failures() {
    let config = ChartConfig {
        palette: vec![],
        ..Default::default()
    };
    assert!(config.validate().is_err());

    let config = ChartConfig {
        month_names: vec!["Jan".to_string()],
        ..Default::default()
    };
    assert!(config.validate().is_err());

    let config = ChartConfig {
        padding: 300.0,
        ..Default::default()
    };
    assert!(config.validate().is_err());

    let config = ChartConfig {
        x_tick_years: 0,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_tick_interval_beyond_year_range_rejected() {
    let config = ChartConfig {
        x_tick_years: 3_000_000_000,
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, HeatmapError::InvalidConfig(_)), "got {:?}", err);

    let config = ChartConfig {
        x_tick_years: i32::MAX as u32,
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ChartConfig::from_file("/nonexistent/chart.yaml").unwrap_err();
    assert!(matches!(err, HeatmapError::Io(_)));
}
