//! `stats`: graph counts and the last run summary.

use photo_graph_core::{Config, GraphHealth, GraphStore, RunReport};
use serde::Serialize;

use super::{fail, open_store, print_json};

#[derive(Debug, Serialize)]
struct StatsOutput {
    dataset: String,
    #[serde(flatten)]
    health: GraphHealth,
    last_run: Option<RunReport>,
}

pub fn handle_stats(config: &Config) -> i32 {
    let store = match open_store(config) {
        Ok(store) => store,
        Err(code) => return code,
    };

    let health = match store.health() {
        Ok(health) => health,
        Err(e) => return fail("Health check failed", &e),
    };
    let last_run = match store.last_run() {
        Ok(last_run) => last_run,
        Err(e) => return fail("Cannot read last run", &e.into()),
    };

    print_json(&StatsOutput {
        dataset: config.storage.dataset.clone(),
        health,
        last_run,
    })
}
