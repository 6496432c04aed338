pub mod args;
pub mod calc;
pub mod employees;

pub use args::{
    CalcCliArgs, Cli, CliCommand, ConfigCliArgs, ConfigCommand, EmployeesCliArgs, EmployeesCommand,
};
pub use calc::handle_calc_command;
pub use employees::handle_employees_command;

use crate::config::Config;
use anyhow::{Context, Result};

pub fn handle_config_command(args: ConfigCliArgs, config: &Config) -> Result<()> {
    match args.command.unwrap_or(ConfigCommand::Show) {
        ConfigCommand::Show => {
            let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
            print!("{}", content);
        }
        ConfigCommand::Path => {
            println!("Config:   {}", Config::config_path()?.display());
            println!("Database: {}", crate::global::db_file()?.display());
        }
    }
    Ok(())
}
