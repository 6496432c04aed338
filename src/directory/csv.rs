//! CSV import and export of the employee directory.
//!
//! The format is spreadsheet-friendly: a `Name,Role,Hourly Rate` header,
//! quoted text columns and a bare numeric rate.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use super::{generate_id, EmployeeProfile};
use crate::calculator::parse_lenient;

const HEADER: &str = "Name,Role,Hourly Rate";
const ACCEPTED_EXTENSIONS: &[&str] = &[".csv", ".xlsx", ".xls"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvError {
    #[error("no employees to export")]
    Empty,
    #[error("unsupported file {0}; please provide a .csv file")]
    UnsupportedFile(String),
    #[error("file is empty or invalid")]
    EmptyFile,
    #[error("no valid employee data found in file")]
    NoValidRows,
}

pub fn default_export_file_name(date: NaiveDate) -> String {
    format!("employees_{}.csv", date.format("%Y-%m-%d"))
}

pub fn export_csv(profiles: &[EmployeeProfile]) -> Result<String, CsvError> {
    if profiles.is_empty() {
        return Err(CsvError::Empty);
    }

    let mut out = String::from(HEADER);
    out.push('\n');
    for profile in profiles {
        out.push_str(&format!(
            "{},{},{}\n",
            quote(&profile.name),
            quote(&profile.role),
            profile.hourly_rate
        ));
    }
    Ok(out)
}

/// Parses an exported (or hand-made) CSV into fresh profiles.
///
/// The first non-blank line is treated as a header. Rows need a name, a
/// role and a positive rate; anything else is skipped.
pub fn import_csv(file_name: &str, text: &str) -> Result<Vec<EmployeeProfile>, CsvError> {
    let lower = file_name.to_lowercase();
    if !ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return Err(CsvError::UnsupportedFile(file_name.to_string()));
    }

    let lines: Vec<&str> = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.len() < 2 {
        return Err(CsvError::EmptyFile);
    }

    let mut imported = Vec::new();
    for (row, line) in lines.iter().enumerate().skip(1) {
        let values = parse_csv_line(line.trim());
        if values.len() < 3 {
            debug!(
                "Skipping row {}: expected 3 columns, got {}",
                row,
                values.len()
            );
            continue;
        }

        let name = values[0].trim();
        let role = values[1].trim();
        let hourly_rate = parse_lenient(&values[2]);

        if name.is_empty() || role.is_empty() || hourly_rate <= 0.0 {
            debug!("Skipping row {}: incomplete employee data", row);
            continue;
        }

        imported.push(EmployeeProfile {
            id: generate_id(),
            name: name.to_string(),
            role: role.to_string(),
            hourly_rate,
        });
    }

    if imported.is_empty() {
        return Err(CsvError::NoValidRows);
    }
    Ok(imported)
}

/// Splits one CSV line, honouring double-quoted fields and `""` escapes.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    values.push(current);

    values
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
