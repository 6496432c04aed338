//! CLI handler for the employee directory.
//!
//! This module handles terminal presentation. Validation and CSV handling
//! live in the `directory` module.

use anyhow::{bail, Context, Result};
use chrono::Local;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing::info;

use super::args::{EmployeesCliArgs, EmployeesCommand};
use crate::calculator::format_fixed2;
use crate::directory::{
    default_export_file_name, export_csv, import_csv, Directory, DirectoryStore, EmployeeProfile,
    SqliteDirectoryStore,
};

pub async fn handle_employees_command(args: EmployeesCliArgs) -> Result<()> {
    let store = SqliteDirectoryStore::default_location()?;
    handle_with_store(args.command, &store).await
}

pub async fn handle_with_store(
    command: EmployeesCommand,
    store: &dyn DirectoryStore,
) -> Result<()> {
    let mut directory = Directory::new(
        store
            .load()
            .await
            .context("Failed to load employee directory")?,
    );

    match command {
        EmployeesCommand::List => {
            print_profiles(directory.profiles().iter());
            println!("\n{}", directory.count_label());
        }
        EmployeesCommand::Search { term } => {
            let matches = directory.search(&term);
            if matches.is_empty() {
                println!("No employees match \"{}\".", term);
            } else {
                print_profiles(matches.into_iter());
            }
        }
        EmployeesCommand::Add { name, role, rate } => {
            let profile = directory.add(&name, &role, rate)?;
            store.save(directory.profiles()).await?;
            println!("Employee added successfully ({})", profile.id);
        }
        EmployeesCommand::Edit {
            id,
            name,
            role,
            rate,
        } => {
            let existing = directory
                .get(&id)
                .cloned()
                .with_context(|| format!("Employee {} not found", id))?;
            directory.update(
                &id,
                name.as_deref().unwrap_or(&existing.name),
                role.as_deref().unwrap_or(&existing.role),
                rate.unwrap_or(existing.hourly_rate),
            )?;
            store.save(directory.profiles()).await?;
            println!("Employee updated successfully");
        }
        EmployeesCommand::Delete { id, force } => {
            let Some(profile) = directory.get(&id) else {
                bail!("Employee {} not found", id);
            };
            if !force && !confirm_delete(profile)? {
                println!("Aborted.");
                return Ok(());
            }
            directory.delete(&id)?;
            store.save(directory.profiles()).await?;
            println!("Employee deleted successfully");
        }
        EmployeesCommand::Export { output } => {
            let csv = export_csv(directory.profiles())?;
            let path = match output {
                Some(path) => path,
                None => crate::global::export_dir()?
                    .join(default_export_file_name(Local::now().date_naive())),
            };
            std::fs::write(&path, csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Exported {} employees to {:?}", directory.len(), path);
            println!("Employees exported to {}", path.display());
        }
        EmployeesCommand::Import { file } => {
            let imported = import_file(&file)?;
            let count = imported.len();
            directory.extend(imported);
            store.save(directory.profiles()).await?;
            println!("Imported {} employee(s)", count);
        }
    }

    Ok(())
}

fn import_file(path: &Path) -> Result<Vec<EmployeeProfile>> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(import_csv(file_name, &text)?)
}

fn confirm_delete(profile: &EmployeeProfile) -> Result<bool> {
    if !io::stdin().is_terminal() {
        bail!("Refusing to delete without confirmation in a non-interactive session; pass --force");
    }
    let proceed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Delete {} ({})?", profile.name, profile.role))
        .default(false)
        .interact()?;
    Ok(proceed)
}

fn print_profiles<'a>(profiles: impl Iterator<Item = &'a EmployeeProfile>) {
    let mut any = false;
    for profile in profiles {
        any = true;
        println!(
            "[{:<2}] {:<24} {:<20} ${:>9}/hour  {}",
            profile.initials(),
            profile.name,
            profile.role,
            format_fixed2(profile.hourly_rate),
            profile.id
        );
    }
    if !any {
        println!(
            "No employees yet. Add one with: meetcost employees add --name <NAME> --role <ROLE> --rate <RATE>"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::MemoryDirectoryStore;

    #[tokio::test]
    async fn test_add_edit_delete_persist() {
        let store = MemoryDirectoryStore::default();

        handle_with_store(
            EmployeesCommand::Add {
                name: "Ada".into(),
                role: "Engineer".into(),
                rate: 120.0,
            },
            &store,
        )
        .await
        .unwrap();
        let id = store.load().await.unwrap()[0].id.clone();

        handle_with_store(
            EmployeesCommand::Edit {
                id: id.clone(),
                name: None,
                role: Some("Staff Engineer".into()),
                rate: None,
            },
            &store,
        )
        .await
        .unwrap();
        let saved = store.load().await.unwrap();
        assert_eq!(saved[0].name, "Ada");
        assert_eq!(saved[0].role, "Staff Engineer");
        assert_eq!(saved[0].hourly_rate, 120.0);

        handle_with_store(EmployeesCommand::Delete { id, force: true }, &store)
            .await
            .unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_add_is_not_saved() {
        let store = MemoryDirectoryStore::default();
        let result = handle_with_store(
            EmployeesCommand::Add {
                name: "Ada".into(),
                role: "".into(),
                rate: 120.0,
            },
            &store,
        )
        .await;
        assert!(result.is_err());
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_then_import_appends() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("team.csv");
        let store = MemoryDirectoryStore::default();

        handle_with_store(
            EmployeesCommand::Add {
                name: "Grace".into(),
                role: "Admiral".into(),
                rate: 150.0,
            },
            &store,
        )
        .await
        .unwrap();
        handle_with_store(
            EmployeesCommand::Export {
                output: Some(output.clone()),
            },
            &store,
        )
        .await
        .unwrap();
        handle_with_store(EmployeesCommand::Import { file: output }, &store)
            .await
            .unwrap();

        let saved = store.load().await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[1].name, "Grace");
        assert_ne!(saved[0].id, saved[1].id);
    }

    #[tokio::test]
    async fn test_export_empty_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryDirectoryStore::default();
        let result = handle_with_store(
            EmployeesCommand::Export {
                output: Some(dir.path().join("none.csv")),
            },
            &store,
        )
        .await;
        assert!(result.is_err());
        assert!(!dir.path().join("none.csv").exists());
    }
}
