//! CLI handler for one-shot cost calculations.

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use super::args::CalcCliArgs;
use crate::calculator::{parse_lenient, DerivedTotals};
use crate::clipboard::ClipboardService;
use crate::config::Config;
use crate::directory::SqliteDirectoryStore;
use crate::roster::{AttendeeRecord, RosterCommand};
use crate::session::{MeetingConfig, MeetingSession, SessionCommand};

#[derive(Debug, Serialize)]
struct CalcReport<'a> {
    meeting: &'a MeetingConfig,
    attendees: &'a [AttendeeRecord],
    totals: DerivedTotals,
}

pub async fn handle_calc_command(args: CalcCliArgs, config: &Config) -> Result<()> {
    let session = build_session(&args, config).await?;

    if args.json {
        let report = CalcReport {
            meeting: session.meeting(),
            attendees: session.roster().attendees(),
            totals: session.totals(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", session.summary());
    }

    if args.copy {
        let clipboard = ClipboardService::new();
        let outcome = clipboard.copy_summary(&session.summary()).await;
        if outcome.succeeded() {
            println!("\nSummary copied to clipboard.");
        } else {
            eprintln!("\nCould not copy the summary to the clipboard.");
        }
    }

    Ok(())
}

async fn build_session(args: &CalcCliArgs, config: &Config) -> Result<MeetingSession> {
    let mut session = MeetingSession::default();

    let duration = args
        .duration
        .clone()
        .unwrap_or_else(|| config.meeting.duration_minutes.to_string());
    session.dispatch(SessionCommand::SetDuration(duration));

    let name = args
        .name
        .clone()
        .unwrap_or_else(|| config.meeting.meeting_name.clone());
    session.dispatch(SessionCommand::SetMeetingName(name));

    if !args.employees.is_empty() {
        match SqliteDirectoryStore::default_location() {
            Ok(store) => {
                session.load_directory(&store).await;
            }
            Err(err) => warn!("Employee directory unavailable: {:#}", err),
        }
    }

    for spec in &args.attendees {
        let (name, rate) = parse_attendee_spec(spec);
        session.dispatch(SessionCommand::Roster(RosterCommand::Add {
            name: Some(name),
            rate: Some(rate),
            directory_ref: None,
        }));
    }

    for profile_id in &args.employees {
        if session.directory().get(profile_id).is_none() {
            warn!("Unknown employee id {}; skipping", profile_id);
            continue;
        }
        session.dispatch(SessionCommand::SelectProfile(profile_id.clone()));
    }

    info!(
        "Calculated cost for {} attendee(s) over {} minutes",
        session.roster().len(),
        session.meeting().duration_minutes
    );
    Ok(session)
}

/// Splits `NAME=RATE` at the last `=`. A spec without `=` is a name with a
/// rate of 0; an unparsable rate is 0 as well.
pub fn parse_attendee_spec(spec: &str) -> (String, f64) {
    match spec.rsplit_once('=') {
        Some((name, rate)) => (name.trim().to_string(), parse_lenient(rate)),
        None => (spec.trim().to_string(), 0.0),
    }
}
