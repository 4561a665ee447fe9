//! SVG serialization of a laid out chart.
//!
//! Element ids and classes follow the usual heat map conventions so the
//! output can be inspected by external tests: `#legend`, `#x-axis`,
//! `#y-axis`, `.cell` rects with `data-month`/`data-temp`/`data-year`, and
//! `.axisLabel` texts.

use crate::axis::{Axis, AxisOrientation};
use crate::chart::Chart;

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

const STYLE: &str = r#"    text { font-family: sans-serif; font-size: 10px; fill: #000; }
    #title { font-size: 20px; }
    .axisLabel { font-size: 14px; }
    .domain, .tick line { stroke: #000; stroke-width: 1; fill: none; }
    .cell:hover { stroke: #000; stroke-width: 1; }
"#;

/// Write a standalone SVG document for `chart`.
pub fn write_svg(chart: &Chart) -> String {
    let config = &chart.config;
    let (w, h, padding) = (config.width, config.height, config.padding);

    let mut svg = String::with_capacity(256 + chart.cells.len() * 256);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <style>
{STYLE}  </style>
  <rect width="100%" height="100%" fill="white"/>
  <text id="title" x="{}" y="{}" text-anchor="middle">{}</text>
"#,
        num(w / 2.0),
        num(padding / 2.0),
        escape_xml(&config.title),
        w = num(w),
        h = num(h),
    ));

    write_legend(&mut svg, chart);
    write_cells(&mut svg, chart);

    write_axis(
        &mut svg,
        "x-axis",
        &format!("translate(0,{})", num(h - padding)),
        &chart.x_axis,
    );
    write_axis(
        &mut svg,
        "y-axis",
        &format!("translate({},{})", num(padding), num(padding)),
        &chart.y_axis,
    );

    svg.push_str(&format!(
        r#"  <text class="axisLabel" x="{}" y="{}" style="text-anchor: middle">Years</text>
  <text class="axisLabel" transform="rotate(-90)" x="{}" y="40" style="text-anchor: middle">Months</text>
"#,
        num((w - padding) / 2.0),
        num(h - padding + 40.0),
        num(-h / 2.0),
    ));

    svg.push_str("</svg>\n");
    svg
}

fn write_legend(svg: &mut String, chart: &Chart) {
    let config = &chart.config;
    let legend = &chart.legend;

    svg.push_str(&format!(
        "  <g id=\"legend\" transform=\"translate({},{})\">\n",
        num(config.padding),
        num(config.height - config.padding / 2.0)
    ));

    for bucket in &legend.buckets {
        svg.push_str(&format!(
            "    <rect x=\"{}\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
            num(bucket.x),
            num(bucket.width),
            num(legend.height),
            bucket.color.to_hex(),
        ));
    }

    svg.push_str(&format!(
        "    <g class=\"legend-axis\" transform=\"translate(0,{})\">\n      <path class=\"domain\" d=\"M0,0H{}\"/>\n",
        num(legend.height),
        num(legend.width)
    ));
    for tick in &legend.ticks {
        svg.push_str(&format!(
            "      <g class=\"tick\" transform=\"translate({},0)\"><line y2=\"{}\"/><text y=\"{}\" dy=\"0.71em\" text-anchor=\"middle\">{}</text></g>\n",
            num(tick.x),
            num(TICK_SIZE),
            num(TICK_SIZE + TICK_PADDING),
            escape_xml(&tick.label)
        ));
    }
    svg.push_str("    </g>\n  </g>\n");
}

fn write_cells(svg: &mut String, chart: &Chart) {
    svg.push_str(&format!(
        "  <g id=\"cells\" transform=\"translate(0,{})\">\n",
        num(chart.config.padding)
    ));

    for cell in &chart.cells {
        svg.push_str(&format!(
            "    <rect class=\"cell\" data-month=\"{}\" data-temp=\"{}\" data-year=\"{}\" data-tooltip=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"><title>{}</title></rect>\n",
            chart.month_attr(cell),
            cell.variance,
            cell.year,
            escape_xml(&cell.tooltip.to_html()),
            num(cell.x),
            num(cell.y),
            num(cell.width),
            num(cell.height),
            cell.fill.to_hex(),
            escape_xml(&cell.tooltip.to_plain()),
        ));
    }

    svg.push_str("  </g>\n");
}

fn write_axis(svg: &mut String, id: &str, transform: &str, axis: &Axis) {
    let (r0, r1) = axis.range;
    svg.push_str(&format!(
        "  <g id=\"{}\" transform=\"{}\">\n",
        id, transform
    ));

    match axis.orientation {
        AxisOrientation::Bottom => {
            svg.push_str(&format!(
                "    <path class=\"domain\" d=\"M{},0H{}\"/>\n",
                num(r0),
                num(r1)
            ));
            for tick in &axis.ticks {
                svg.push_str(&format!(
                    "    <g class=\"tick\" transform=\"translate({},0)\"><line y2=\"{}\"/><text y=\"{}\" dy=\"0.71em\" text-anchor=\"middle\">{}</text></g>\n",
                    num(tick.position),
                    num(TICK_SIZE),
                    num(TICK_SIZE + TICK_PADDING),
                    escape_xml(&tick.label)
                ));
            }
        }
        AxisOrientation::Left => {
            svg.push_str(&format!(
                "    <path class=\"domain\" d=\"M0,{}V{}\"/>\n",
                num(r0),
                num(r1)
            ));
            for tick in &axis.ticks {
                svg.push_str(&format!(
                    "    <g class=\"tick\" transform=\"translate(0,{})\"><line x2=\"-{}\"/><text x=\"-{}\" dy=\"0.32em\" text-anchor=\"end\">{}</text></g>\n",
                    num(tick.position),
                    num(TICK_SIZE),
                    num(TICK_SIZE + TICK_PADDING),
                    escape_xml(&tick.label)
                ));
            }
        }
    }

    svg.push_str("  </g>\n");
}

/// Compact number formatting: at most 3 decimals, no trailing zeros.
pub fn num(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
