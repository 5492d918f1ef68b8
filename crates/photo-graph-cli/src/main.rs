//! Photo Graph CLI
//!
//! # Commands
//!
//! - `build`: Rebuild the similarity graph of a dataset from an image directory
//! - `similar`: Neighbours of one image, highest similarity first
//! - `stats`: Node and edge counts plus the last run summary
//!
//! Results go to stdout as JSON; logs go to stderr.
//!
//! # Exit codes
//! - 0: success
//! - 1: run or store failure
//! - 2: configuration error

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use photo_graph_core::config::LoggingConfig;
use photo_graph_core::Config;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;

use error::CliExitCode;

/// Photo Graph - image similarity graph builder
#[derive(Parser)]
#[command(name = "photo-graph")]
#[command(version)]
#[command(about = "Build and query a graph of visually similar images")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file; defaults to config/default.toml plus PHOTO_GRAPH__* overrides
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reset the dataset and rebuild it from the source directory
    Build(commands::build::BuildArgs),
    /// List the images most similar to one image
    Similar(commands::similar::SimilarArgs),
    /// Print node and edge counts
    Stats,
}

fn init_logging(verbose: u8, logging: &LoggingConfig) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location)
        .with_writer(std::io::stderr);

    if logging.format == "compact" {
        builder.compact().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match commands::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_logging(cli.verbose, &LoggingConfig::default());
            error!(error = %e, "Invalid configuration");
            std::process::exit(CliExitCode::Config.code());
        }
    };
    init_logging(cli.verbose, &config.logging);

    let exit_code = run(cli.command, config).await;
    std::process::exit(exit_code);
}

async fn run(command: Commands, config: Config) -> i32 {
    match command {
        Commands::Build(args) => commands::build::handle_build(args, config).await,
        Commands::Similar(args) => commands::similar::handle_similar(args, &config),
        Commands::Stats => commands::stats::handle_stats(&config),
    }
}
