//! Employee directory.
//!
//! Reusable profiles (name, role, hourly rate) that can be added to a
//! meeting with one selection. The meeting roster only references profiles
//! by id; this module owns their lifecycle.

pub mod csv;
pub mod store;

pub use csv::{default_export_file_name, export_csv, import_csv, parse_csv_line, CsvError};
pub use store::{
    load_or_warn, save_in_background, DirectoryStore, MemoryDirectoryStore, SqliteDirectoryStore,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Persisted profile record. Field names match the stored JSON
/// (`hourlyRate`), so existing exports stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub id: String,
    pub name: String,
    pub role: String,
    pub hourly_rate: f64,
}

impl EmployeeProfile {
    /// Up to two uppercase initials, e.g. "Ada Lovelace" -> "AL".
    pub fn initials(&self) -> String {
        self.name
            .split(' ')
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DirectoryError {
    #[error("invalid employee profile: {0}")]
    InvalidProfile(String),
    #[error("employee {0} not found")]
    NotFound(String),
}

/// `emp_<unix millis>_<9 random chars>`
pub fn generate_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("emp_{}_{}", millis, &random[..9])
}

fn validate(
    name: &str,
    role: &str,
    hourly_rate: f64,
) -> Result<(String, String, f64), DirectoryError> {
    let name = name.trim();
    let role = role.trim();
    if name.is_empty() {
        return Err(DirectoryError::InvalidProfile("name is required".into()));
    }
    if role.is_empty() {
        return Err(DirectoryError::InvalidProfile("role is required".into()));
    }
    if !hourly_rate.is_finite() || hourly_rate <= 0.0 {
        return Err(DirectoryError::InvalidProfile(
            "hourly rate must be greater than zero".into(),
        ));
    }
    Ok((name.to_string(), role.to_string(), hourly_rate))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    profiles: Vec<EmployeeProfile>,
}

impl Directory {
    pub fn new(profiles: Vec<EmployeeProfile>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[EmployeeProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&EmployeeProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn add(
        &mut self,
        name: &str,
        role: &str,
        hourly_rate: f64,
    ) -> Result<EmployeeProfile, DirectoryError> {
        let (name, role, hourly_rate) = validate(name, role, hourly_rate)?;
        let profile = EmployeeProfile {
            id: generate_id(),
            name,
            role,
            hourly_rate,
        };
        info!("Added employee {} ({})", profile.name, profile.id);
        self.profiles.push(profile.clone());
        Ok(profile)
    }

    pub fn update(
        &mut self,
        id: &str,
        name: &str,
        role: &str,
        hourly_rate: f64,
    ) -> Result<&EmployeeProfile, DirectoryError> {
        let (name, role, hourly_rate) = validate(name, role, hourly_rate)?;
        let profile = self
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;

        profile.name = name;
        profile.role = role;
        profile.hourly_rate = hourly_rate;
        info!("Updated employee {}", id);
        Ok(profile)
    }

    pub fn delete(&mut self, id: &str) -> Result<EmployeeProfile, DirectoryError> {
        let index = self
            .profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;
        let removed = self.profiles.remove(index);
        info!("Deleted employee {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Appends profiles that were already validated, e.g. by CSV import.
    pub fn extend(&mut self, imported: Vec<EmployeeProfile>) {
        debug!("Appending {} imported employees", imported.len());
        self.profiles.extend(imported);
    }

    /// Case-insensitive substring match on name or role. A blank term
    /// matches everything.
    pub fn search(&self, term: &str) -> Vec<&EmployeeProfile> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.profiles.iter().collect();
        }
        self.profiles
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&term) || p.role.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn count_label(&self) -> String {
        let count = self.profiles.len();
        format!("{} employee{}", count, if count == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Directory {
        let mut directory = Directory::default();
        directory.add("Ada Lovelace", "Engineer", 120.0).unwrap();
        directory.add("Grace Hopper", "Admiral", 150.0).unwrap();
        directory.add("Linus", "Maintainer", 95.0).unwrap();
        directory
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts[0], "emp");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn test_add_trims_and_validates() {
        let mut directory = Directory::default();
        let profile = directory.add("  Ada  ", " Engineer ", 120.0).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.role, "Engineer");

        assert!(matches!(
            directory.add("", "Engineer", 10.0),
            Err(DirectoryError::InvalidProfile(_))
        ));
        assert!(matches!(
            directory.add("Bob", "  ", 10.0),
            Err(DirectoryError::InvalidProfile(_))
        ));
        assert!(matches!(
            directory.add("Bob", "Engineer", 0.0),
            Err(DirectoryError::InvalidProfile(_))
        ));
        assert!(matches!(
            directory.add("Bob", "Engineer", f64::NAN),
            Err(DirectoryError::InvalidProfile(_))
        ));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_update_keeps_id() {
        let mut directory = sample();
        let id = directory.profiles()[0].id.clone();

        let updated = directory
            .update(&id, "Ada King", "Countess", 200.0)
            .unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.name, "Ada King");
        assert_eq!(updated.hourly_rate, 200.0);

        assert_eq!(
            directory.update("emp_missing", "X", "Y", 1.0),
            Err(DirectoryError::NotFound("emp_missing".into()))
        );
    }

    #[test]
    fn test_delete() {
        let mut directory = sample();
        let id = directory.profiles()[1].id.clone();

        let removed = directory.delete(&id).unwrap();
        assert_eq!(removed.name, "Grace Hopper");
        assert_eq!(directory.len(), 2);
        assert!(directory.get(&id).is_none());
        assert!(directory.delete(&id).is_err());
    }

    #[test]
    fn test_search_matches_name_or_role() {
        let directory = sample();
        assert_eq!(directory.search("").len(), 3);
        assert_eq!(directory.search("grace")[0].name, "Grace Hopper");
        assert_eq!(directory.search("MAINT")[0].name, "Linus");
        assert!(directory.search("nobody").is_empty());
    }

    #[test]
    fn test_count_label() {
        let mut directory = Directory::default();
        assert_eq!(directory.count_label(), "0 employees");
        directory.add("Solo", "Founder", 10.0).unwrap();
        assert_eq!(directory.count_label(), "1 employee");
    }

    #[test]
    fn test_initials() {
        let directory = sample();
        assert_eq!(directory.profiles()[0].initials(), "AL");
        assert_eq!(directory.profiles()[2].initials(), "L");
    }

    #[test]
    fn test_profile_json_uses_camel_case() {
        let profile = EmployeeProfile {
            id: "emp_1".into(),
            name: "Ada".into(),
            role: "Engineer".into(),
            hourly_rate: 120.5,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["hourlyRate"], 120.5);
        assert!(json.get("hourly_rate").is_none());
    }
}
