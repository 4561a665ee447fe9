//! Tests for the chart layout pipeline.

use heatmap_common::config::DEFAULT_PALETTE;
use heatmap_common::{ChartConfig, ColorSampling, Dataset, HeatmapError, MeasurementRecord};
use renderer::Chart;
use test_utils::{
    assert_approx_eq, century_dataset, full_record_dataset, single_record_dataset,
    single_year_dataset,
};

fn build(dataset: &Dataset) -> Chart {
    Chart::build(dataset, &ChartConfig::default()).unwrap()
}

// ============================================================================
// Cell geometry
// ============================================================================

#[test]
fn test_one_cell_per_record() {
    let chart = build(&century_dataset());
    assert_eq!(chart.cells.len(), 3);

    let years: Vec<i32> = chart.cells.iter().map(|c| c.year).collect();
    assert_eq!(years, vec![1900, 1950, 2000]);
}

#[test]
fn test_same_year_cells_share_x() {
    let chart = build(&single_year_dataset());
    assert_eq!(chart.cells[0].x, 100.0);
    assert_eq!(chart.cells[1].x, 100.0);
}

#[test]
fn test_cell_rows_follow_month() {
    let chart = build(&single_year_dataset());
    let january = &chart.cells[0];
    let june = &chart.cells[1];

    assert_approx_eq!(january.height, 400.0 / 12.0, 1e-9);
    assert_approx_eq!(january.y, 0.0, 1e-9);
    assert_approx_eq!(june.y, 5.0 * 400.0 / 12.0, 1e-9);
    assert_eq!(january.width, 5.0);
}

#[test]
fn test_cells_stay_inside_plot() {
    let chart = build(&full_record_dataset());
    let config = &chart.config;
    for cell in &chart.cells {
        assert!(cell.x >= config.padding - 1e-9);
        assert!(cell.x <= config.width - config.padding + 1e-9);
        assert!(cell.y >= -1e-9);
        assert!(cell.y + cell.height <= config.plot_height() + 1e-9);
    }
}

#[test]
fn test_single_record_sits_mid_range() {
    let chart = build(&single_record_dataset());
    assert_eq!(chart.cells.len(), 1);
    assert_eq!(chart.cells[0].x, 750.0);
    assert!(DEFAULT_PALETTE.contains(&chart.cells[0].fill));
}

// ============================================================================
// Color
// ============================================================================

#[test]
fn test_extreme_temperatures_use_palette_ends() {
    let chart = build(&single_year_dataset());
    assert_eq!(chart.color_domain, (6.5, 10.0));
    assert_eq!(chart.cells[0].temperature, 6.5);
    assert_eq!(chart.cells[0].fill, DEFAULT_PALETTE[0]);
    assert_eq!(chart.cells[1].fill, DEFAULT_PALETTE[10]);
}

#[test]
fn test_midpoint_temperature_uses_middle_color() {
    let chart = build(&century_dataset());
    assert_eq!(chart.cells[0].fill, DEFAULT_PALETTE[0]);
    assert_eq!(chart.cells[1].fill, DEFAULT_PALETTE[5]);
    assert_eq!(chart.cells[2].fill, DEFAULT_PALETTE[10]);
}

#[test]
fn test_record_sampling_balances_buckets() {
    let config = ChartConfig {
        color_sampling: ColorSampling::Records,
        palette: DEFAULT_PALETTE[..4].to_vec(),
        ..ChartConfig::default()
    };
    let records = (1..=12)
        .map(|m| MeasurementRecord::new(2000, m, if m == 12 { 50.0 } else { m as f64 }))
        .collect();
    let dataset = Dataset::new(0.0, records).unwrap();
    let chart = Chart::build(&dataset, &config).unwrap();

    let mut counts = [0usize; 4];
    for cell in &chart.cells {
        let idx = config.palette.iter().position(|c| *c == cell.fill).unwrap();
        counts[idx] += 1;
    }
    assert_eq!(counts, [3, 3, 3, 3]);
}

// ============================================================================
// Axes, legend and description
// ============================================================================

#[test]
fn test_month_axis_labels() {
    let chart = build(&century_dataset());
    assert_eq!(
        chart.y_axis.labels(),
        vec![
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
            "December"
        ]
    );
}

#[test]
fn test_year_axis_every_ten_years() {
    let chart = build(&century_dataset());
    let labels = chart.x_axis.labels();
    assert_eq!(labels.len(), 11);
    assert_eq!(labels[0], "1900");
    assert_eq!(labels[10], "2000");
    assert_eq!(chart.x_axis.ticks[0].position, 100.0);
}

#[test]
fn test_legend_matches_color_domain() {
    let chart = build(&century_dataset());
    assert_eq!(chart.legend.buckets.len(), 11);
    assert_eq!(chart.legend.buckets[0].lower_bound, 7.0);
    assert_eq!(chart.legend.buckets[10].upper_bound, 9.0);
}

#[test]
fn test_description() {
    let chart = build(&century_dataset());
    assert_eq!(chart.description, "1900 - 2000: base temperature 8°C");
}

#[test]
fn test_month_attr() {
    let dataset = century_dataset();
    let chart = build(&dataset);
    assert_eq!(chart.month_attr(&chart.cells[2]), 12);

    let config = ChartConfig {
        zero_based_month_attr: true,
        ..ChartConfig::default()
    };
    let chart = Chart::build(&dataset, &config).unwrap();
    assert_eq!(chart.month_attr(&chart.cells[0]), 0);
    assert_eq!(chart.month_attr(&chart.cells[2]), 11);
}

#[test]
fn test_rebuild_does_not_carry_state() {
    let config = ChartConfig::default();
    let first = Chart::build(&century_dataset(), &config).unwrap();
    let _other = Chart::build(&single_year_dataset(), &config).unwrap();
    let again = Chart::build(&century_dataset(), &config).unwrap();
    assert_eq!(first.cells, again.cells);
    assert_eq!(first.legend, again.legend);
}

#[test]
fn test_invalid_config_rejected() {
    let config = ChartConfig {
        palette: vec![],
        ..ChartConfig::default()
    };
    let err = Chart::build(&century_dataset(), &config).unwrap_err();
    assert!(matches!(err, HeatmapError::InvalidConfig(_)));
}
