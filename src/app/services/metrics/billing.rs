//! Fixed-tariff billing
//!
//! Every usage unit bills at the same tariff. A meter that was not read
//! (null or zero usage) has no bill; display surfaces show the shared
//! sentinel text instead of an amount.

use crate::constants::{METER_NOT_READ, TARIFF_RATE};

/// Monetary amount for a usage reading
///
/// Returns `None` for unread meters (null or zero usage).
pub fn bill_amount(usage: Option<i64>) -> Option<f64> {
    match usage {
        Some(units) if units != 0 => Some((units * TARIFF_RATE) as f64),
        _ => None,
    }
}

/// Display form of a bill: the unread sentinel or the formatted amount
pub fn bill_display(usage: Option<i64>) -> String {
    match bill_amount(usage) {
        Some(amount) => format_amount(amount),
        None => METER_NOT_READ.to_string(),
    }
}

/// Format an amount with two decimals and comma thousands separators
pub fn format_amount(value: f64) -> String {
    group_thousands(&format!("{:.2}", value))
}

/// Insert comma separators into the integer digits of a formatted number
pub fn group_thousands(formatted: &str) -> String {
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted, None),
    };
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}
