//! CLI command handlers
//!
//! - `build`: Full pipeline run
//! - `similar`: Neighbour query
//! - `stats`: Graph counts

pub mod build;
pub mod similar;
pub mod stats;

use std::path::Path;

use photo_graph_core::{Config, CoreResult};
use photo_graph_storage::RocksDbGraphStore;
use serde::Serialize;
use tracing::error;

use crate::error::{exit_code_for_error, CliExitCode};

/// Loads `path` if given, else the layered default configuration, and
/// validates it.
pub fn load_config(path: Option<&Path>) -> CoreResult<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    config.validate()?;
    Ok(config)
}

/// Opens the configured dataset, logging and mapping failure to an exit code.
pub(crate) fn open_store(config: &Config) -> Result<RocksDbGraphStore, i32> {
    RocksDbGraphStore::open_dataset(&config.storage).map_err(|e| {
        error!(path = %config.dataset_path().display(), error = %e, "Cannot open graph store");
        CliExitCode::Failure.code()
    })
}

/// Writes `value` to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            CliExitCode::Success.code()
        }
        Err(e) => {
            error!(error = %e, "Cannot encode output");
            CliExitCode::Failure.code()
        }
    }
}

pub(crate) fn fail(context: &str, err: &photo_graph_core::CoreError) -> i32 {
    error!(error = %err, "{}", context);
    exit_code_for_error(err).code()
}
