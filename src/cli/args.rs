use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "meetcost")]
#[command(about = "What is this meeting costing us?", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Calculate a meeting's cost and print the summary
    Calc(CalcCliArgs),
    /// Interactive session with live, animated totals (default)
    Session,
    /// Manage the employee directory
    Employees(EmployeesCliArgs),
    /// Show configuration
    Config(ConfigCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug, Default)]
pub struct CalcCliArgs {
    /// Meeting name shown in the summary
    #[arg(short, long)]
    pub name: Option<String>,
    /// Meeting duration in minutes (defaults to the configured duration)
    #[arg(short, long)]
    pub duration: Option<String>,
    /// Ad-hoc attendee as NAME=RATE (repeatable; NAME may be empty)
    #[arg(short, long = "attendee", value_name = "NAME=RATE")]
    pub attendees: Vec<String>,
    /// Directory profile id to include (repeatable)
    #[arg(short, long = "employee", value_name = "PROFILE_ID")]
    pub employees: Vec<String>,
    /// Copy the summary to the clipboard
    #[arg(short, long)]
    pub copy: bool,
    /// Print totals as JSON instead of the text summary
    #[arg(long)]
    pub json: bool,
}

#[derive(ClapArgs, Debug)]
pub struct EmployeesCliArgs {
    #[command(subcommand)]
    pub command: EmployeesCommand,
}

#[derive(Subcommand, Debug)]
pub enum EmployeesCommand {
    /// List all employees
    List,
    /// Add an employee
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
        /// Hourly rate in dollars
        #[arg(long)]
        rate: f64,
    },
    /// Edit an existing employee
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        rate: Option<f64>,
    },
    /// Delete an employee
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Search employees by name or role
    Search { term: String },
    /// Export the directory to CSV
    Export {
        /// Output file (defaults to employees_<date>.csv in the download directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import employees from CSV and append them to the directory
    Import { file: PathBuf },
}

#[derive(ClapArgs, Debug)]
pub struct ConfigCliArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the current configuration
    Show,
    /// Print config and database paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_calc(args: &[&str]) -> CalcCliArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(CliCommand::Calc(args)) => args,
            other => panic!("expected calc, got {:?}", other),
        }
    }

    #[test]
    fn test_calc_flags() {
        let args = parse_calc(&[
            "meetcost", "calc", "-n", "Standup", "-d", "15", "-a", "Ada=100", "-a", "=40", "-e",
            "emp_1", "--copy", "--json",
        ]);
        assert_eq!(args.name.as_deref(), Some("Standup"));
        assert_eq!(args.duration.as_deref(), Some("15"));
        assert_eq!(args.attendees, vec!["Ada=100", "=40"]);
        assert_eq!(args.employees, vec!["emp_1"]);
        assert!(args.copy);
        assert!(args.json);
    }

    #[test]
    fn test_calc_defaults() {
        let args = parse_calc(&["meetcost", "calc"]);
        assert!(args.duration.is_none());
        assert!(args.attendees.is_empty());
        assert!(!args.copy);
        assert!(!args.json);
    }

    #[test]
    fn test_calc_rejects_unknown_flag() {
        let result = Cli::try_parse_from(["meetcost", "calc", "--no-animate"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_subcommand_means_session() {
        let cli = Cli::try_parse_from(["meetcost", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }
}
