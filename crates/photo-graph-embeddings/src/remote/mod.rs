//! Remote classifier model reached over HTTP.

mod client;
mod retry;

pub use client::{HttpClassifierModel, RemoteModelConfig};
pub use retry::RetryPolicy;
