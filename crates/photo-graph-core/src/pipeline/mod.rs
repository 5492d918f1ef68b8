//! Pipeline driver and run lifecycle.
//!
//! A run moves through
//!
//! ```text
//! RESET -> INGESTING -> NODES_COMPLETE -> COMPUTING_SIMILARITY -> EDGES_APPLIED -> PRUNED
//! ```
//!
//! with one `INGESTING -> INGESTING` step per stored image. No phase may be
//! skipped, and similarity is only computed once the node set is complete.

mod driver;
mod report;
mod state;

pub use driver::{PipelineDriver, PipelineOptions};
pub use report::{RunReport, SkippedImage};
pub use state::{RunPhase, RunState};
