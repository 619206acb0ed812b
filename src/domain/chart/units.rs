//! Unit handling for displayed values.
//!
//! Amounts labelled `万元` arrive in yuan and are shown divided by 10,000.

pub const WAN_UNIT: &str = "万元";
const YUAN_PER_WAN: f64 = 10_000.0;

/// Indicators whose series are amounts regardless of their metadata.
const WAN_INDICATORS: [&str; 2] = ["7.11", "7.22"];

/// Non-finite input yields 0.
pub fn convert_yuan_to_wan(value: f64) -> f64 {
    if value.is_finite() { value / YUAN_PER_WAN } else { 0.0 }
}

pub fn convert_wan_to_yuan(value: f64) -> f64 {
    if value.is_finite() { value * YUAN_PER_WAN } else { 0.0 }
}

pub fn needs_wan_conversion(indicator_code: &str, unit: Option<&str>, y_axis_name: Option<&str>) -> bool {
    unit == Some(WAN_UNIT)
        || y_axis_name.is_some_and(|name| name.contains(WAN_UNIT))
        || WAN_INDICATORS.contains(&indicator_code)
}

pub fn decimal_places(unit: Option<&str>) -> usize {
    match unit {
        Some(unit) if !unit.is_empty() => 2,
        _ => 4,
    }
}

pub fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Numeric value as plotted: converted when the unit is `万元`, then rounded.
pub fn display_value(raw: f64, unit: Option<&str>) -> f64 {
    let value = if unit == Some(WAN_UNIT) { convert_yuan_to_wan(raw) } else { raw };
    round_to(value, decimal_places(unit))
}

/// Text form with the unit attached; `%` is glued to the number.
pub fn format_value(raw: f64, unit: Option<&str>) -> String {
    if !raw.is_finite() {
        return "N/A".to_string();
    }
    let value = if unit == Some(WAN_UNIT) { convert_yuan_to_wan(raw) } else { raw };
    let number = format!("{:.*}", decimal_places(unit), value);
    match unit {
        Some("%") => format!("{}%", number),
        Some(unit) if !unit.is_empty() => format!("{} {}", number, unit),
        _ => number,
    }
}

/// Compact form used in the raw-data table.
pub fn format_table_value(value: f64) -> String {
    if value > 10_000.0 {
        format!("{:.2} 亿", value / 10_000.0)
    } else if value > 1_000.0 {
        format!("{:.2} 千", value / 1_000.0)
    } else {
        format!("{:.2}", value)
    }
}

/// Y axis label, e.g. `数值 (万元)`.
pub fn axis_label(unit: Option<&str>) -> String {
    match unit {
        Some(unit) if !unit.is_empty() => format!("数值 ({})", unit),
        _ => "数值".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_converts_to_zero() {
        assert_eq!(convert_yuan_to_wan(f64::NAN), 0.0);
        assert_eq!(convert_yuan_to_wan(f64::INFINITY), 0.0);
    }

    #[test]
    fn unitless_ratio_keeps_four_decimals() {
        assert_eq!(format_value(0.123456, None), "0.1235");
        assert_eq!(format_value(12.3456, Some("%")), "12.35%");
    }

    #[test]
    fn conversion_triggers() {
        assert!(needs_wan_conversion("7.22", None, None));
        assert!(needs_wan_conversion("7.31", None, Some("金额(万元)")));
        assert!(!needs_wan_conversion("7.31", Some("%"), None));
    }
}
