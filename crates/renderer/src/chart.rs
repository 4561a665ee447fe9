//! Chart layout: turns a dataset and a chart configuration into positioned,
//! colored cells plus axes and legend.

use chrono::NaiveDate;
use tracing::{debug, instrument};

use heatmap_common::{
    ChartConfig, Color, ColorSampling, Dataset, HeatmapError, HeatmapResult, MeasurementRecord,
};

use crate::axis::Axis;
use crate::legend::Legend;
use crate::scale::{LinearScale, QuantileScale, TimeScale};
use crate::tooltip::Tooltip;

/// Fixed month domain, centering months 1-12 with half a month of padding.
pub const MONTH_DOMAIN: (f64, f64) = (0.5, 12.5);

/// One rectangle of the heat map.
///
/// `x` is absolute; `y` is relative to the plot area, which starts
/// `padding` pixels below the top of the SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub year: i32,
    pub month: u32,
    pub variance: f64,
    pub temperature: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub tooltip: Tooltip,
}

/// A fully laid out heat map, ready to be written as SVG.
#[derive(Debug, Clone)]
pub struct Chart {
    pub config: ChartConfig,
    pub base_temperature: f64,
    pub x_domain: (NaiveDate, NaiveDate),
    pub color_domain: (f64, f64),
    pub time_scale: TimeScale,
    pub month_scale: LinearScale,
    pub color_scale: QuantileScale<Color>,
    pub cells: Vec<Cell>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend: Legend,
    pub description: String,
}

impl Chart {
    /// Run the whole layout pipeline. Every scale is derived from `dataset`;
    /// nothing is carried over from earlier builds.
    #[instrument(skip_all, fields(records = dataset.len()))]
    pub fn build(dataset: &Dataset, config: &ChartConfig) -> HeatmapResult<Self> {
        config.validate()?;

        let x_domain = dataset.date_extent();
        let color_domain = dataset.temperature_extent();

        let time_scale = TimeScale::new(x_domain, (config.padding, config.width - config.padding));
        let month_scale = LinearScale::new(MONTH_DOMAIN, (0.0, config.plot_height()));

        let samples = match config.color_sampling {
            ColorSampling::Extent => vec![color_domain.0, color_domain.1],
            ColorSampling::Records => dataset.temperatures(),
        };
        let color_scale = QuantileScale::new(&samples, config.palette.clone())?;

        debug!(
            x_start = %x_domain.0,
            x_end = %x_domain.1,
            color_min = color_domain.0,
            color_max = color_domain.1,
            thresholds = ?color_scale.thresholds(),
            "Computed chart domains"
        );

        let cell_height = config.cell_height();
        let cells = dataset
            .records()
            .iter()
            .map(|record| {
                layout_cell(
                    record,
                    dataset,
                    config,
                    &time_scale,
                    &month_scale,
                    &color_scale,
                    cell_height,
                )
            })
            .collect::<HeatmapResult<Vec<_>>>()?;

        let x_axis = Axis::years(&time_scale, config.x_tick_years);
        let y_axis = Axis::months(&month_scale, config);
        let legend = Legend::build(
            color_domain,
            &color_scale,
            config.legend_width,
            config.legend_height,
        )?;

        let (first_year, last_year) = dataset.year_range();
        let description = format!(
            "{} - {}: base temperature {}°C",
            first_year,
            last_year,
            dataset.base_temperature()
        );

        Ok(Self {
            config: config.clone(),
            base_temperature: dataset.base_temperature(),
            x_domain,
            color_domain,
            time_scale,
            month_scale,
            color_scale,
            cells,
            x_axis,
            y_axis,
            legend,
            description,
        })
    }

    /// Value written to a cell's `data-month` attribute.
    pub fn month_attr(&self, cell: &Cell) -> u32 {
        if self.config.zero_based_month_attr {
            cell.month - 1
        } else {
            cell.month
        }
    }
}

fn layout_cell(
    record: &MeasurementRecord,
    dataset: &Dataset,
    config: &ChartConfig,
    time_scale: &TimeScale,
    month_scale: &LinearScale,
    color_scale: &QuantileScale<Color>,
    cell_height: f64,
) -> HeatmapResult<Cell> {
    let year_start = record.year_start().ok_or_else(|| {
        HeatmapError::MalformedDataset(format!("year {} is not a representable date", record.year))
    })?;
    let temperature = dataset.absolute_temperature(record);
    let fill = color_scale.scale(temperature).copied().ok_or_else(|| {
        HeatmapError::Render(format!(
            "no color for temperature {} ({}-{:02})",
            temperature, record.year, record.month
        ))
    })?;

    Ok(Cell {
        year: record.year,
        month: record.month,
        variance: record.variance,
        temperature,
        x: time_scale.scale(year_start),
        y: month_scale.scale(record.month as f64) - cell_height / 2.0,
        width: config.cell_width,
        height: cell_height,
        fill,
        tooltip: Tooltip::for_record(record, dataset.base_temperature(), config),
    })
}
