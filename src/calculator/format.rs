//! Number formatting for display and summaries.
//!
//! Rounding is half away from zero on the value scaled by 100, the same
//! rule for currency and for the fixed two-decimal hours line.

use super::finite_or_zero;

/// US-style currency: `$1,234.50`, `-$3.00`. Non-finite input shows `$0.00`.
pub fn format_currency(amount: f64) -> String {
    let (negative, whole, cents) = split_cents(amount);
    let sign = if negative { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(&whole), cents)
}

/// Two fixed decimals without grouping, e.g. `0.50` or `12.13`.
pub fn format_fixed2(value: f64) -> String {
    let (negative, whole, cents) = split_cents(value);
    let sign = if negative { "-" } else { "" };
    format!("{}{}.{}", sign, whole, cents)
}

/// Shortest round-trip rendering of a minute count: `30`, `30.5`.
pub fn format_minutes(minutes: f64) -> String {
    let minutes = finite_or_zero(minutes);
    if minutes == 0.0 {
        // avoids printing "-0"
        return "0".to_string();
    }
    format!("{}", minutes)
}

/// Splits a value into sign, whole digits and two cent digits. Works on
/// the exact decimal expansion of the scaled float, so huge amounts keep
/// their digits instead of saturating an integer cast.
fn split_cents(value: f64) -> (bool, String, String) {
    let scaled = (finite_or_zero(value) * 100.0).round();
    let negative = scaled < 0.0;
    let digits = format!("{:0>3.0}", scaled.abs());
    let (whole, cents) = digits.split_at(digits.len() - 2);
    (negative, whole.to_string(), cents.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
