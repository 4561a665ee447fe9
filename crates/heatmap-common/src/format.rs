//! Display rounding and temperature label formatting.

/// Round `value` to `decimals` places, half away from zero.
///
/// Display only; scaled values always use the unrounded input.
pub fn precision(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `"12.3°C"`, one decimal place.
pub fn format_celsius(value: f64) -> String {
    format!("{:.1}°C", normalize_zero(precision(value, 1)))
}

/// `"+1.2°C"` for positive values, `"-1.2°C"` for negative, `"0.0°C"` for zero.
pub fn format_signed_celsius(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{}{}", sign, format_celsius(value))
}

/// One-decimal tick label without unit.
pub fn format_tick(value: f64) -> String {
    format!("{:.1}", normalize_zero(precision(value, 1)))
}

// Rounding -0.04 gives -0.0, which would print as "-0.0".
fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
