//! `similar`: neighbours of one image.

use clap::Args;
use photo_graph_core::{Config, GraphStore};
use serde::Serialize;

use super::{fail, open_store, print_json};

#[derive(Args, Debug)]
pub struct SimilarArgs {
    /// Identity of the image, as stored by `build`
    pub identity: String,

    /// Maximum number of neighbours to print
    #[arg(long, default_value = "10")]
    pub limit: usize,
}

#[derive(Debug, Serialize)]
struct Neighbor {
    identity: String,
    weight: f64,
}

#[derive(Debug, Serialize)]
struct SimilarOutput {
    identity: String,
    neighbors: Vec<Neighbor>,
}

pub fn handle_similar(args: SimilarArgs, config: &Config) -> i32 {
    let store = match open_store(config) {
        Ok(store) => store,
        Err(code) => return code,
    };

    let neighbors = match store.neighbors(&args.identity) {
        Ok(neighbors) => neighbors,
        Err(e) => return fail("Neighbour query failed", &e),
    };

    print_json(&SimilarOutput {
        identity: args.identity,
        neighbors: neighbors
            .into_iter()
            .take(args.limit)
            .map(|(identity, weight)| Neighbor { identity, weight })
            .collect(),
    })
}
