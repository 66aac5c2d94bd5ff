//! Tests for never-fail numeric cell normalization

use crate::app::services::feed_parser::fields::{parse_amount, parse_float, parse_usage};

#[test]
fn test_parse_amount_strips_thousands_separators() {
    assert_eq!(parse_amount("1,234.50"), Some(1234.50));
    assert_eq!(parse_amount("28,500"), Some(28500.0));
}

#[test]
fn test_parse_amount_blank_and_text_are_none() {
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("   "), None);
    assert_eq!(parse_amount("pending"), None);
}

#[test]
fn test_parse_amount_reads_leading_prefix() {
    assert_eq!(parse_amount("120.5 est"), Some(120.5));
    // A currency sign before the digits leaves no leading number
    assert_eq!(parse_amount("£3,200"), None);
}

#[test]
fn test_parse_float_plain_and_negative() {
    assert_eq!(parse_float("100.5"), Some(100.5));
    assert_eq!(parse_float("-3.5"), Some(-3.5));
}

#[test]
fn test_parse_float_exponent_form() {
    assert_eq!(parse_float("1.5e3"), Some(1500.0));
}

#[test]
fn test_parse_usage_whole_number() {
    assert_eq!(parse_usage("15"), Some(15));
    assert_eq!(parse_usage(" 42 "), Some(42));
}

#[test]
fn test_parse_usage_negative_is_unread() {
    assert_eq!(parse_usage("-5"), None);
}

#[test]
fn test_parse_usage_blank_and_text_are_none() {
    assert_eq!(parse_usage(""), None);
    assert_eq!(parse_usage("n/a"), None);
}

#[test]
fn test_parse_usage_zero_is_kept() {
    assert_eq!(parse_usage("0"), Some(0));
}

#[test]
fn test_parse_usage_truncates_at_decimal_point() {
    assert_eq!(parse_usage("12.7"), Some(12));
}
