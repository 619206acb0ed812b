use finance_dashboard_wasm::domain::chart::units::{
    axis_label, convert_wan_to_yuan, convert_yuan_to_wan, display_value, format_table_value, format_value,
    needs_wan_conversion,
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

#[quickcheck]
fn yuan_to_wan_divides_by_ten_thousand(value: f64) -> TestResult {
    if !value.is_finite() {
        return TestResult::discard();
    }
    TestResult::from_bool(convert_yuan_to_wan(value) == value / 10_000.0)
}

#[quickcheck]
fn wan_conversion_is_invertible(value: f64) -> TestResult {
    if !value.is_finite() || value.abs() > 1e300 {
        return TestResult::discard();
    }
    let back = convert_wan_to_yuan(convert_yuan_to_wan(value));
    TestResult::from_bool((back - value).abs() <= value.abs() * 1e-12 + 1e-9)
}

#[test]
fn non_finite_input_converts_to_zero() {
    assert_eq!(convert_yuan_to_wan(f64::NAN), 0.0);
    assert_eq!(convert_yuan_to_wan(f64::INFINITY), 0.0);
    assert_eq!(convert_wan_to_yuan(f64::NEG_INFINITY), 0.0);
}

#[test]
fn wan_values_are_rounded_to_two_decimals() {
    assert_eq!(display_value(12_345_678.0, Some("万元")), 1234.57);
    assert_eq!(display_value(0.123_456_7, None), 0.1235);
    assert_eq!(display_value(45.678, Some("%")), 45.68);
}

#[test]
fn conversion_triggers() {
    assert!(needs_wan_conversion("7.99", Some("万元"), None));
    assert!(needs_wan_conversion("7.99", None, Some("金额 (万元)")));
    assert!(needs_wan_conversion("7.22", None, None));
    assert!(!needs_wan_conversion("7.13", Some("%"), None));
}

#[test]
fn formatted_values() {
    insta::assert_snapshot!(format_value(12_345_678.0, Some("万元")), @"1234.57 万元");
    insta::assert_snapshot!(format_value(12.5, Some("%")), @"12.50%");
    insta::assert_snapshot!(format_value(0.123456, None), @"0.1235");
    insta::assert_snapshot!(format_value(f64::NAN, Some("%")), @"N/A");
    insta::assert_snapshot!(format_table_value(123_456.0), @"12.35 亿");
    insta::assert_snapshot!(format_table_value(2_500.0), @"2.50 千");
    insta::assert_snapshot!(axis_label(Some("倍")), @"数值 (倍)");
}
