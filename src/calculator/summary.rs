//! Plain-text meeting summary used for clipboard export.

use super::{compute_totals, finite_or_zero, format_currency, format_fixed2, format_minutes};
use crate::roster::Roster;
use std::fmt::Write;

const TITLE: &str = "Meeting Cost Summary";
const RULE_WIDTH: usize = 30;

/// Renders the summary for the current roster and meeting settings.
///
/// Only valid attendees are listed, numbered from 1 in roster order. The
/// output depends on nothing but the arguments.
pub fn generate_summary(
    meeting_name: Option<&str>,
    duration_minutes: f64,
    roster: &Roster,
) -> String {
    let duration_minutes = finite_or_zero(duration_minutes);
    let totals = compute_totals(roster, duration_minutes);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    out.push('\n');

    if let Some(name) = meeting_name.map(str::trim).filter(|n| !n.is_empty()) {
        let _ = writeln!(out, "Meeting: {}", name);
        out.push('\n');
    }

    let minutes = format_minutes(duration_minutes);
    let hours = format_fixed2(duration_minutes / 60.0);
    let _ = writeln!(out, "Duration: {} minutes", minutes);
    let _ = writeln!(out, "Duration: {} hours", hours);
    out.push('\n');

    out.push_str("Attendees:\n");
    let mut listed = 0;
    for (index, attendee) in roster.valid_attendees().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} - {}/hr",
            index + 1,
            attendee.summary_name(),
            format_currency(attendee.hourly_rate)
        );
        listed += 1;
    }
    if listed == 0 {
        out.push_str("  No attendees added\n");
    }

    out.push('\n');
    let lines = [
        ("Total Hourly Rate", totals.total_hourly_rate),
        ("Cost per Minute", totals.cost_per_minute),
        ("Total Meeting Cost", totals.total_cost),
    ];
    for (label, amount) in lines {
        let _ = writeln!(out, "{}: {}", label, format_currency(amount));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_layout() {
        let mut roster = Roster::new();
        roster.add_attendee(Some("Alice".into()), Some(100.0), None);
        roster.add_attendee(Some("Bob".into()), Some(50.0), None);

        let summary = generate_summary(Some("Sprint Planning"), 30.0, &roster);
        let expected = "\
Meeting Cost Summary
==============================

Meeting: Sprint Planning

Duration: 30 minutes
Duration: 0.50 hours

Attendees:
  1. Alice - $100.00/hr
  2. Bob - $50.00/hr

Total Hourly Rate: $150.00
Cost per Minute: $2.50
Total Meeting Cost: $75.00
";
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_meeting_line_omitted_without_name() {
        let roster = Roster::new();
        for name in [None, Some(""), Some("   ")] {
            let summary = generate_summary(name, 0.0, &roster);
            assert!(!summary.contains("Meeting:"));
            assert!(summary.starts_with(
                "Meeting Cost Summary\n==============================\n\nDuration: 0 minutes\n"
            ));
        }
    }

    #[test]
    fn test_unnamed_attendee() {
        let mut roster = Roster::new();
        roster.add_attendee(Some(String::new()), Some(40.0), None);

        let summary = generate_summary(None, 60.0, &roster);
        assert!(summary.contains("  1. Unnamed - $40.00/hr\n"));
        assert!(summary.contains("Duration: 1.00 hours\n"));
        assert!(summary.ends_with("Total Meeting Cost: $40.00\n"));
    }

    #[test]
    fn test_invalid_attendees_are_skipped_and_renumbered() {
        let mut roster = Roster::new();
        roster.add_attendee(Some("Free".into()), Some(0.0), None);
        roster.add_attendee(Some("Paid".into()), Some(1250.0), None);

        let summary = generate_summary(None, 90.0, &roster);
        assert!(!summary.contains("Free"));
        assert!(summary.contains("  1. Paid - $1,250.00/hr\n"));
        assert!(summary.contains("Total Meeting Cost: $1,875.00\n"));
    }

    #[test]
    fn test_no_valid_attendees_message() {
        let mut roster = Roster::new();
        roster.add_attendee(Some("Volunteer".into()), Some(-1.0), None);

        let summary = generate_summary(None, 45.0, &roster);
        assert!(summary.contains("Attendees:\n  No attendees added\n\n"));
        assert!(summary.contains("Total Hourly Rate: $0.00\n"));
    }

    #[test]
    fn test_negative_duration_reports_zero_cost() {
        let mut roster = Roster::new();
        roster.add_attendee(Some("Gil".into()), Some(60.0), None);

        let summary = generate_summary(None, -30.0, &roster);
        assert!(summary.contains("Duration: -30 minutes\n"));
        assert!(summary.contains("Duration: -0.50 hours\n"));
        assert!(summary.contains("Cost per Minute: $1.00\n"));
        assert!(summary.contains("Total Meeting Cost: $0.00\n"));
    }

    #[test]
    fn test_summary_is_repeatable() {
        let mut roster = Roster::new();
        roster.add_attendee(Some("Hal".into()), Some(77.7), None);
        let first = generate_summary(Some("Retro"), 25.0, &roster);
        let second = generate_summary(Some("Retro"), 25.0, &roster);
        assert_eq!(first, second);
    }
}
