//! Typed roster commands.
//!
//! Input sources (CLI flags, prompts, directory toggles) translate their
//! events into a `RosterCommand` and hand it to `Roster::dispatch`, so the
//! roster never knows where a mutation came from.

use super::{AttendeeId, AttendeeRecord, Roster};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendeeField {
    Name,
    HourlyRate,
}

impl AttendeeField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::HourlyRate => "hourly_rate",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RosterCommand {
    Add {
        name: Option<String>,
        rate: Option<f64>,
        directory_ref: Option<String>,
    },
    Remove {
        id: AttendeeId,
    },
    Update {
        id: AttendeeId,
        field: AttendeeField,
        value: String,
    },
    RemoveByDirectoryRef {
        directory_ref: String,
    },
}

/// What a command actually did. Missing targets are reported as
/// `Unchanged` rather than as errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterOutcome {
    Added(AttendeeRecord),
    Removed(AttendeeRecord),
    Updated(AttendeeId),
    Unchanged,
}

impl RosterOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

impl Roster {
    pub fn dispatch(&mut self, command: RosterCommand) -> RosterOutcome {
        match command {
            RosterCommand::Add {
                name,
                rate,
                directory_ref,
            } => RosterOutcome::Added(self.add_attendee(name, rate, directory_ref)),
            RosterCommand::Remove { id } => self
                .remove_attendee(id)
                .map(RosterOutcome::Removed)
                .unwrap_or(RosterOutcome::Unchanged),
            RosterCommand::Update { id, field, value } => {
                if self.update_attendee(id, field, &value) {
                    RosterOutcome::Updated(id)
                } else {
                    RosterOutcome::Unchanged
                }
            }
            RosterCommand::RemoveByDirectoryRef { directory_ref } => self
                .remove_by_directory_ref(&directory_ref)
                .map(RosterOutcome::Removed)
                .unwrap_or(RosterOutcome::Unchanged),
        }
    }
}
