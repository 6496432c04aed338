//! Meeting session.
//!
//! One `MeetingSession` holds everything a single meeting calculation
//! needs: the roster, the meeting settings, the cached directory and which
//! profiles are currently selected. All mutation goes through `dispatch`,
//! which recomputes the totals and retargets the animated display.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::animation::{AnimationTiming, DisplayAnimator};
use crate::calculator::{compute_totals, generate_summary, parse_lenient, DerivedTotals};
use crate::directory::{load_or_warn, Directory, DirectoryStore, EmployeeProfile};
use crate::roster::{AttendeeRecord, Roster, RosterCommand, RosterOutcome};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingConfig {
    pub meeting_name: Option<String>,
    pub duration_minutes: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Roster(RosterCommand),
    /// Raw duration input in minutes; unparsable input becomes 0.
    SetDuration(String),
    SetMeetingName(String),
    SelectProfile(String),
    DeselectProfile(String),
    /// The profile was deleted from the directory elsewhere.
    ProfileDeleted(String),
}

#[derive(Default)]
pub struct MeetingSession {
    roster: Roster,
    meeting: MeetingConfig,
    directory: Directory,
    selected: BTreeSet<String>,
    animator: Option<DisplayAnimator>,
}

impl MeetingSession {
    pub fn new(meeting: MeetingConfig) -> Self {
        Self {
            meeting,
            ..Self::default()
        }
    }

    pub fn with_animation(mut self, timing: AnimationTiming) -> Self {
        let mut animator = DisplayAnimator::new(timing);
        animator.retarget(&self.totals());
        self.animator = Some(animator);
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn meeting(&self) -> &MeetingConfig {
        &self.meeting
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn animator(&self) -> Option<&DisplayAnimator> {
        self.animator.as_ref()
    }

    pub fn is_selected(&self, profile_id: &str) -> bool {
        self.selected.contains(profile_id)
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Fresh totals for the current roster and duration.
    pub fn totals(&self) -> DerivedTotals {
        compute_totals(&self.roster, self.meeting.duration_minutes)
    }

    pub fn summary(&self) -> String {
        generate_summary(
            self.meeting.meeting_name.as_deref(),
            self.meeting.duration_minutes,
            &self.roster,
        )
    }

    pub fn dispatch(&mut self, command: SessionCommand) -> DerivedTotals {
        debug!("Dispatching {:?}", command);
        match command {
            SessionCommand::Roster(command) => self.apply_roster(command),
            SessionCommand::SetDuration(raw) => {
                self.meeting.duration_minutes = parse_lenient(&raw);
            }
            SessionCommand::SetMeetingName(name) => {
                let name = name.trim();
                self.meeting.meeting_name = (!name.is_empty()).then(|| name.to_string());
            }
            SessionCommand::SelectProfile(profile_id) => self.select_profile(&profile_id),
            SessionCommand::DeselectProfile(profile_id) => self.deselect_profile(&profile_id),
            SessionCommand::ProfileDeleted(profile_id) => {
                self.deselect_profile(&profile_id);
                if self.directory.delete(&profile_id).is_err() {
                    debug!("Deleted profile {} was not cached", profile_id);
                }
            }
        }
        self.recalculate()
    }

    /// Replaces the cached directory. Attendees linked to profiles that no
    /// longer exist are dropped along with their selection.
    pub fn set_directory(&mut self, profiles: Vec<EmployeeProfile>) -> DerivedTotals {
        self.directory = Directory::new(profiles);

        let stale: Vec<String> = self
            .roster
            .attendees()
            .iter()
            .filter_map(|a| a.directory_ref.clone())
            .chain(self.selected.iter().cloned())
            .filter(|id| self.directory.get(id).is_none())
            .collect();

        for profile_id in stale {
            self.deselect_profile(&profile_id);
        }
        self.recalculate()
    }

    /// Loads profiles from the store. An unreadable store leaves the
    /// session with an empty directory; attendees already in the meeting
    /// keep their links, since nothing was actually deleted.
    pub async fn load_directory(&mut self, store: &dyn DirectoryStore) -> usize {
        match load_or_warn(store).await {
            Some(profiles) => {
                let count = profiles.len();
                self.set_directory(profiles);
                count
            }
            None => {
                self.directory = Directory::default();
                0
            }
        }
    }

    fn apply_roster(&mut self, command: RosterCommand) {
        // one attendee per profile
        if let RosterCommand::Add {
            directory_ref: Some(profile_id),
            ..
        } = &command
        {
            if self.roster.find_by_directory_ref(profile_id).is_some() {
                debug!("Profile {} is already in the meeting", profile_id);
                return;
            }
        }

        let outcome = self.roster.dispatch(command);
        if !outcome.changed() {
            debug!("Roster command had no effect");
        }
        match outcome {
            RosterOutcome::Added(AttendeeRecord {
                directory_ref: Some(profile_id),
                ..
            }) => {
                self.selected.insert(profile_id);
            }
            RosterOutcome::Removed(AttendeeRecord {
                directory_ref: Some(profile_id),
                ..
            }) => {
                self.selected.remove(&profile_id);
            }
            _ => {}
        }
    }

    fn select_profile(&mut self, profile_id: &str) {
        if self.selected.contains(profile_id) {
            return;
        }
        let Some(profile) = self.directory.get(profile_id).cloned() else {
            debug!("Ignoring selection of unknown profile {}", profile_id);
            return;
        };

        self.roster.add_attendee(
            Some(profile.name),
            Some(profile.hourly_rate),
            Some(profile.id.clone()),
        );
        self.selected.insert(profile.id);
    }

    fn deselect_profile(&mut self, profile_id: &str) {
        self.selected.remove(profile_id);
        self.roster.remove_by_directory_ref(profile_id);
    }

    fn recalculate(&mut self) -> DerivedTotals {
        let totals = self.totals();
        if let Some(animator) = self.animator.as_mut() {
            animator.retarget(&totals);
        }
        totals
    }
}
