//! Attendee roster.
//!
//! An ordered list of attendees for a single meeting session. Insertion
//! order is display order. The roster only links to directory profiles by
//! id and never owns their lifecycle.

pub mod command;

pub use command::{AttendeeField, RosterCommand, RosterOutcome};

use crate::calculator::parse_lenient;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Sequential attendee identifier. Doubles as the 1-based creation ordinal
/// used for the "Attendee N" placeholder, so it is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttendeeId(pub u64);

impl fmt::Display for AttendeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendeeRecord {
    pub id: AttendeeId,
    pub name: String,
    pub hourly_rate: f64,
    pub directory_ref: Option<String>,
}

impl AttendeeRecord {
    /// Name shown in the live roster, falling back to "Attendee N".
    pub fn display_name(&self) -> String {
        match self.name.trim() {
            "" => format!("Attendee {}", self.id),
            name => name.to_string(),
        }
    }

    /// Name used in the exported summary, falling back to "Unnamed".
    pub fn summary_name(&self) -> &str {
        match self.name.trim() {
            "" => "Unnamed",
            name => name,
        }
    }

    /// Only attendees with a positive rate count toward totals.
    pub fn is_valid(&self) -> bool {
        self.hourly_rate > 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    attendees: Vec<AttendeeRecord>,
    next_ordinal: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attendees(&self) -> &[AttendeeRecord] {
        &self.attendees
    }

    pub fn len(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attendees.is_empty()
    }

    pub fn get(&self, id: AttendeeId) -> Option<&AttendeeRecord> {
        self.attendees.iter().find(|a| a.id == id)
    }

    pub fn find_by_directory_ref(&self, directory_ref: &str) -> Option<&AttendeeRecord> {
        self.attendees
            .iter()
            .find(|a| a.directory_ref.as_deref() == Some(directory_ref))
    }

    pub fn valid_attendees(&self) -> impl Iterator<Item = &AttendeeRecord> {
        self.attendees.iter().filter(|a| a.is_valid())
    }

    pub fn add_attendee(
        &mut self,
        name: Option<String>,
        rate: Option<f64>,
        directory_ref: Option<String>,
    ) -> AttendeeRecord {
        self.next_ordinal += 1;
        let record = AttendeeRecord {
            id: AttendeeId(self.next_ordinal),
            name: name.unwrap_or_default(),
            hourly_rate: sanitize_rate(rate.unwrap_or(0.0)),
            directory_ref,
        };
        debug!(
            "Added attendee {} ({}) at ${}/hr",
            record.id,
            record.display_name(),
            record.hourly_rate
        );
        self.attendees.push(record.clone());
        record
    }

    /// Removes the attendee, returning it so callers can release any
    /// directory selection it held. Unknown ids are ignored.
    pub fn remove_attendee(&mut self, id: AttendeeId) -> Option<AttendeeRecord> {
        let index = self.attendees.iter().position(|a| a.id == id)?;
        let removed = self.attendees.remove(index);
        debug!("Removed attendee {}", removed.id);
        Some(removed)
    }

    /// Applies a raw field edit. Rate input that does not parse becomes 0.
    /// Returns false when the id is unknown.
    pub fn update_attendee(&mut self, id: AttendeeId, field: AttendeeField, value: &str) -> bool {
        let Some(record) = self.attendees.iter_mut().find(|a| a.id == id) else {
            return false;
        };

        match field {
            AttendeeField::Name => record.name = value.to_string(),
            AttendeeField::HourlyRate => record.hourly_rate = sanitize_rate(parse_lenient(value)),
        }
        debug!("Updated attendee {} {:?}", id, field);
        true
    }

    pub fn remove_by_directory_ref(&mut self, directory_ref: &str) -> Option<AttendeeRecord> {
        let id = self.find_by_directory_ref(directory_ref)?.id;
        self.remove_attendee(id)
    }
}

fn sanitize_rate(rate: f64) -> f64 {
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}
