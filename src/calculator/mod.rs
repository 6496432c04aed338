//! Meeting cost calculator.
//!
//! Totals are a pure function of the roster and the duration. Nothing here
//! is cached: callers recompute after every mutation and feed the result to
//! whatever displays it.

pub mod format;
pub mod summary;

pub use format::{format_currency, format_fixed2, format_minutes};
pub use summary::generate_summary;

use crate::roster::Roster;
use serde::{Deserialize, Serialize};

const MINUTES_PER_HOUR: f64 = 60.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedTotals {
    pub total_hourly_rate: f64,
    pub cost_per_minute: f64,
    pub total_cost: f64,
}

impl DerivedTotals {
    pub const ZERO: DerivedTotals = DerivedTotals {
        total_hourly_rate: 0.0,
        cost_per_minute: 0.0,
        total_cost: 0.0,
    };
}

/// Sums the rates of valid attendees and derives the per-minute and total
/// cost. A duration of zero or less still reports the hourly burn rate but
/// zeroes the total cost.
pub fn compute_totals(roster: &Roster, duration_minutes: f64) -> DerivedTotals {
    let total_hourly_rate = finite_or_zero(
        roster
            .valid_attendees()
            .map(|a| finite_or_zero(a.hourly_rate))
            .sum(),
    );

    if total_hourly_rate <= 0.0 {
        return DerivedTotals::ZERO;
    }

    let cost_per_minute = finite_or_zero(total_hourly_rate / MINUTES_PER_HOUR);
    let duration_minutes = finite_or_zero(duration_minutes);

    let total_cost = if duration_minutes <= 0.0 {
        0.0
    } else {
        finite_or_zero(total_hourly_rate * (duration_minutes / MINUTES_PER_HOUR))
    };

    DerivedTotals {
        total_hourly_rate,
        cost_per_minute,
        total_cost,
    }
}

pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parses user-typed numbers the forgiving way: the longest numeric prefix
/// wins ("30min" is 30) and anything unparsable or non-finite is 0.
pub fn parse_lenient(input: &str) -> f64 {
    let s = input.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut digits = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_with_rates(rates: &[f64]) -> Roster {
        let mut roster = Roster::new();
        for rate in rates {
            roster.add_attendee(None, Some(*rate), None);
        }
        roster
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_two_attendees_half_hour() {
        let totals = compute_totals(&roster_with_rates(&[100.0, 50.0]), 30.0);
        assert_close(totals.total_hourly_rate, 150.0);
        assert_close(totals.cost_per_minute, 2.5);
        assert_close(totals.total_cost, 75.0);
    }

    #[test]
    fn test_zero_rate_attendee_is_excluded() {
        let totals = compute_totals(&roster_with_rates(&[0.0]), 60.0);
        assert_eq!(totals, DerivedTotals::ZERO);
    }

    #[test]
    fn test_empty_roster_no_duration() {
        assert_eq!(compute_totals(&Roster::new(), 0.0), DerivedTotals::ZERO);
    }

    #[test]
    fn test_non_positive_duration_keeps_rate_but_zeroes_cost() {
        let roster = roster_with_rates(&[120.0, 30.0]);
        for duration in [0.0, -15.0, f64::NAN, f64::NEG_INFINITY] {
            let totals = compute_totals(&roster, duration);
            assert_eq!(totals.total_cost, 0.0);
            assert_close(totals.total_hourly_rate, 150.0);
            assert_close(totals.cost_per_minute, 2.5);
        }
    }

    #[test]
    fn test_no_valid_attendees_zeroes_everything() {
        let roster = roster_with_rates(&[0.0, -20.0]);
        for duration in [0.0, 30.0, 600.0] {
            assert_eq!(compute_totals(&roster, duration), DerivedTotals::ZERO);
        }
    }

    #[test]
    fn test_total_cost_matches_formula() {
        let cases: &[(&[f64], f64)] = &[
            (&[85.0], 45.0),
            (&[33.33, 66.67, 12.5], 17.0),
            (&[250.0, -10.0, 75.25], 90.5),
        ];
        for (rates, duration) in cases {
            let totals = compute_totals(&roster_with_rates(rates), *duration);
            let expected = totals.total_hourly_rate * duration / 60.0;
            assert_close(totals.total_cost, expected);
        }
    }

    #[test]
    fn test_overflow_never_leaks_infinity() {
        let totals = compute_totals(&roster_with_rates(&[f64::MAX, f64::MAX]), 60.0);
        assert_eq!(totals, DerivedTotals::ZERO);
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient("42"), 42.0);
        assert_eq!(parse_lenient("  12.5 "), 12.5);
        assert_eq!(parse_lenient("30min"), 30.0);
        assert_eq!(parse_lenient(".5"), 0.5);
        assert_eq!(parse_lenient("5."), 5.0);
        assert_eq!(parse_lenient("-3"), -3.0);
        assert_eq!(parse_lenient("1e3"), 1000.0);
        assert_eq!(parse_lenient("2e"), 2.0);
        assert_eq!(parse_lenient(""), 0.0);
        assert_eq!(parse_lenient("abc"), 0.0);
        assert_eq!(parse_lenient("-"), 0.0);
        assert_eq!(parse_lenient("Infinity"), 0.0);
        assert_eq!(parse_lenient("1e999"), 0.0);
    }
}
