//! Interactive meeting session.
//!
//! A prompt loop over a single `MeetingSession`. Every menu action becomes
//! a `SessionCommand`; after each one the totals are redrawn, easing from
//! the old values to the new ones.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, FuzzySelect, Input, MultiSelect, Select};
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::animation::AnimationTiming;
use crate::calculator::{format_currency, parse_lenient, DerivedTotals};
use crate::clipboard::ClipboardService;
use crate::config::Config;
use crate::directory::{
    save_in_background, DirectoryStore, EmployeeProfile, MemoryDirectoryStore, SqliteDirectoryStore,
};
use crate::roster::{AttendeeField, AttendeeRecord, RosterCommand};
use crate::session::{MeetingConfig, MeetingSession, SessionCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    AddAttendee,
    PickEmployees,
    EditAttendee,
    RemoveAttendee,
    SetDuration,
    SetMeetingName,
    ShowSummary,
    CopySummary,
    DeleteEmployee,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 10] = [
        MenuAction::AddAttendee,
        MenuAction::PickEmployees,
        MenuAction::EditAttendee,
        MenuAction::RemoveAttendee,
        MenuAction::SetDuration,
        MenuAction::SetMeetingName,
        MenuAction::ShowSummary,
        MenuAction::CopySummary,
        MenuAction::DeleteEmployee,
        MenuAction::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::AddAttendee => "Add custom attendee",
            Self::PickEmployees => "Pick attendees from directory",
            Self::EditAttendee => "Edit attendee",
            Self::RemoveAttendee => "Remove attendee",
            Self::SetDuration => "Set duration",
            Self::SetMeetingName => "Set meeting name",
            Self::ShowSummary => "Show summary",
            Self::CopySummary => "Copy summary to clipboard",
            Self::DeleteEmployee => "Delete employee from directory",
            Self::Quit => "Quit",
        }
    }
}

pub async fn run_session(config: Config) -> Result<()> {
    if !io::stdin().is_terminal() {
        info!("Non-interactive session. Use 'meetcost calc' for scripted calculations.");
        return Ok(());
    }

    let store: Arc<dyn DirectoryStore> = match SqliteDirectoryStore::default_location() {
        Ok(store) => Arc::new(store),
        Err(err) => {
            warn!(
                "Employee directory unavailable ({:#}); using an empty one",
                err
            );
            Arc::new(MemoryDirectoryStore::default())
        }
    };
    let clipboard = ClipboardService::new();
    let timing = AnimationTiming::from(&config.display);

    let meeting_name = Some(config.meeting.meeting_name.trim().to_string())
        .filter(|n| !n.is_empty());
    let mut session = MeetingSession::new(MeetingConfig {
        meeting_name,
        duration_minutes: config.meeting.duration_minutes,
    })
    .with_animation(timing);
    session.load_directory(store.as_ref()).await;

    let theme = ColorfulTheme::default();
    let labels: Vec<&str> = MenuAction::ALL.iter().map(MenuAction::label).collect();

    println!();
    println!("Meeting Cost Calculator");
    println!("=======================");
    println!("{}", session.directory().count_label());
    render(&session, timing.frame).await;

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        match MenuAction::ALL[choice] {
            MenuAction::AddAttendee => add_attendee(&theme, &mut session)?,
            MenuAction::PickEmployees => pick_employees(&theme, &mut session)?,
            MenuAction::EditAttendee => edit_attendee(&theme, &mut session)?,
            MenuAction::RemoveAttendee => remove_attendee(&theme, &mut session)?,
            MenuAction::SetDuration => {
                let raw: String = Input::with_theme(&theme)
                    .with_prompt("Duration (minutes)")
                    .with_initial_text(session.meeting().duration_minutes.to_string())
                    .allow_empty(true)
                    .interact_text()?;
                session.dispatch(SessionCommand::SetDuration(raw));
            }
            MenuAction::SetMeetingName => {
                let name: String = Input::with_theme(&theme)
                    .with_prompt("Meeting name")
                    .with_initial_text(session.meeting().meeting_name.clone().unwrap_or_default())
                    .allow_empty(true)
                    .interact_text()?;
                session.dispatch(SessionCommand::SetMeetingName(name));
            }
            MenuAction::ShowSummary => {
                println!();
                print!("{}", session.summary());
            }
            MenuAction::CopySummary => copy_summary(&clipboard, &session).await,
            MenuAction::DeleteEmployee => delete_employee(&theme, &mut session, &store)?,
            MenuAction::Quit => break,
        }

        render(&session, timing.frame).await;
    }

    if config.behavior.copy_on_exit {
        copy_summary(&clipboard, &session).await;
    }

    Ok(())
}

fn add_attendee(theme: &ColorfulTheme, session: &mut MeetingSession) -> Result<()> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Name")
        .allow_empty(true)
        .interact_text()?;
    let rate: String = Input::with_theme(theme)
        .with_prompt("Hourly rate ($)")
        .allow_empty(true)
        .interact_text()?;

    session.dispatch(SessionCommand::Roster(RosterCommand::Add {
        name: Some(name),
        rate: Some(parse_lenient(&rate)),
        directory_ref: None,
    }));
    Ok(())
}

fn pick_employees(theme: &ColorfulTheme, session: &mut MeetingSession) -> Result<()> {
    let profiles = session.directory().profiles().to_vec();
    if profiles.is_empty() {
        println!("No employees in the directory yet. Add some with `meetcost employees add`.");
        return Ok(());
    }

    let items: Vec<String> = profiles.iter().map(profile_label).collect();
    let defaults: Vec<bool> = profiles
        .iter()
        .map(|p| session.is_selected(&p.id))
        .collect();

    let chosen = MultiSelect::with_theme(theme)
        .with_prompt("Attendees from directory (space to toggle)")
        .items(&items)
        .defaults(&defaults)
        .interact()?;

    for command in selection_changes(&profiles, &defaults, &chosen) {
        session.dispatch(command);
    }
    Ok(())
}

fn edit_attendee(theme: &ColorfulTheme, session: &mut MeetingSession) -> Result<()> {
    let Some(index) = choose_attendee(theme, session, "Edit which attendee?")? else {
        return Ok(());
    };
    let attendee = session.roster().attendees()[index].clone();

    let field = match Select::with_theme(theme)
        .with_prompt("Field")
        .items(&["Name", "Hourly rate"][..])
        .default(0)
        .interact()?
    {
        0 => AttendeeField::Name,
        _ => AttendeeField::HourlyRate,
    };
    let initial = match field {
        AttendeeField::Name => attendee.name.clone(),
        AttendeeField::HourlyRate => attendee.hourly_rate.to_string(),
    };
    let value: String = Input::with_theme(theme)
        .with_prompt(field.as_str())
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;

    session.dispatch(SessionCommand::Roster(RosterCommand::Update {
        id: attendee.id,
        field,
        value,
    }));
    Ok(())
}

fn remove_attendee(theme: &ColorfulTheme, session: &mut MeetingSession) -> Result<()> {
    if let Some(index) = choose_attendee(theme, session, "Remove which attendee?")? {
        let id = session.roster().attendees()[index].id;
        session.dispatch(SessionCommand::Roster(RosterCommand::Remove { id }));
    }
    Ok(())
}

fn delete_employee(
    theme: &ColorfulTheme,
    session: &mut MeetingSession,
    store: &Arc<dyn DirectoryStore>,
) -> Result<()> {
    let profiles = session.directory().profiles().to_vec();
    if profiles.is_empty() {
        println!("The directory is empty.");
        return Ok(());
    }

    let items: Vec<String> = profiles.iter().map(profile_label).collect();
    let index = FuzzySelect::with_theme(theme)
        .with_prompt("Delete which employee?")
        .items(&items)
        .interact()?;
    let profile = &profiles[index];

    let proceed = Confirm::with_theme(theme)
        .with_prompt(format!("Are you sure you want to delete {}?", profile.name))
        .default(false)
        .interact()?;
    if !proceed {
        return Ok(());
    }

    session.dispatch(SessionCommand::ProfileDeleted(profile.id.clone()));
    save_in_background(Arc::clone(store), session.directory().profiles().to_vec());
    Ok(())
}

fn choose_attendee(
    theme: &ColorfulTheme,
    session: &MeetingSession,
    prompt: &str,
) -> Result<Option<usize>> {
    if session.roster().is_empty() {
        println!("No attendees yet.");
        return Ok(None);
    }
    let items: Vec<String> = session
        .roster()
        .attendees()
        .iter()
        .map(attendee_label)
        .collect();
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(Some(index))
}

async fn copy_summary(clipboard: &ClipboardService, session: &MeetingSession) {
    let outcome = clipboard.copy_summary(&session.summary()).await;
    if outcome.succeeded() {
        println!("Summary copied to clipboard!");
    } else {
        println!("Could not reach the clipboard. Use \"Show summary\" and copy it by hand.");
    }
}

fn attendee_label(attendee: &AttendeeRecord) -> String {
    format!(
        "{} ({}/hr)",
        attendee.display_name(),
        format_currency(attendee.hourly_rate)
    )
}

fn profile_label(profile: &EmployeeProfile) -> String {
    format!(
        "{} - {} ({}/hr)",
        profile.name,
        profile.role,
        format_currency(profile.hourly_rate)
    )
}

/// Turns a multi-select result into select/deselect commands for the
/// profiles whose checkbox actually changed.
fn selection_changes(
    profiles: &[EmployeeProfile],
    before: &[bool],
    chosen: &[usize],
) -> Vec<SessionCommand> {
    profiles
        .iter()
        .enumerate()
        .filter_map(|(index, profile)| {
            let was = before.get(index).copied().unwrap_or(false);
            let now = chosen.contains(&index);
            match (was, now) {
                (false, true) => Some(SessionCommand::SelectProfile(profile.id.clone())),
                (true, false) => Some(SessionCommand::DeselectProfile(profile.id.clone())),
                _ => None,
            }
        })
        .collect()
}

fn totals_line(totals: &DerivedTotals) -> String {
    format!(
        "Total: {}  |  Hourly rate: {}  |  Per minute: {}",
        format_currency(totals.total_cost),
        format_currency(totals.total_hourly_rate),
        format_currency(totals.cost_per_minute)
    )
}

async fn render(session: &MeetingSession, frame: Duration) {
    println!();
    if session.roster().is_empty() {
        println!("  (no attendees)");
    }
    for attendee in session.roster().attendees() {
        println!(
            "  {:<24} {}/hr",
            attendee.display_name(),
            format_currency(attendee.hourly_rate)
        );
    }

    let Some(animator) = session.animator() else {
        println!("{}", totals_line(&session.totals()));
        return;
    };

    let mut stdout = io::stdout();
    loop {
        let settled = animator.is_settled();
        let shown = animator.displayed();
        // pad to wipe leftovers from a longer previous frame
        print!("\r{:<90}", totals_line(&shown));
        let _ = stdout.flush();
        if settled {
            break;
        }
        tokio::time::sleep(frame).await;
    }
    println!();
}
