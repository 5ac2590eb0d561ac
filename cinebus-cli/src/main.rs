use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::commands::{BuildArgs, RouteArgs, ShowtimesArgs};
use crate::config::CliConfig;
use crate::error::CliError;

mod commands;
mod config;
mod error;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Door-to-cinema journey planner over the street and bus network"
)]
struct Cli {
    #[arg(
        short,
        long,
        default_value = "cinebus.toml",
        help = "The TOML configuration file."
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
enum Commands {
    #[command(about = "Build the street, bus and city graphs and cache them")]
    Build(BuildArgs),

    #[command(about = "Plan a journey between two coordinates")]
    Route(RouteArgs),

    #[command(about = "List the showtimes that can still be reached")]
    Showtimes(ShowtimesArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn configure_workers(workers: Option<usize>) -> Result<(), CliError> {
    if let Some(workers) = workers {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()?;
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = CliConfig::from_file(&cli.config)?;
    configure_workers(config.workers)?;

    match &cli.command {
        Commands::Build(args) => commands::build(&config, args),
        Commands::Route(args) => commands::route(&config, args),
        Commands::Showtimes(args) => commands::showtimes(&config, args),
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::NoRoute) => {
            println!("No route available");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_route_flags() {
        let cli = Cli::try_parse_from([
            "cinebus",
            "--config",
            "city.toml",
            "route",
            "--from",
            "2.17,41.38",
            "--to",
            "2.16,41.39",
            "--start",
            "2026-10-18T20:00:00",
            "--end",
            "2026-10-18T22:00:00",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("city.toml"));
        assert!(matches!(cli.command, Commands::Route(_)));
    }
}
