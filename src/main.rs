use anyhow::Result;
use clap::Parser;
use meetcost::{
    app,
    cli::{handle_calc_command, handle_config_command, handle_employees_command, Cli, CliCommand},
    config::Config,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;

    match cli.command {
        Some(CliCommand::Version) => {
            println!("meetcost {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(CliCommand::Calc(args)) => handle_calc_command(args, &config).await,
        Some(CliCommand::Employees(args)) => handle_employees_command(args).await,
        Some(CliCommand::Config(args)) => handle_config_command(args, &config),
        Some(CliCommand::Session) | None => app::run_session(config).await,
    }
}
