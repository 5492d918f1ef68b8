//! Image source abstraction.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::{Identity, PixelTensor};

/// One enumerated input image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceImage {
    pub identity: Identity,
    pub path: PathBuf,
}

impl SourceImage {
    pub fn new(identity: impl Into<Identity>, path: impl Into<PathBuf>) -> Self {
        Self {
            identity: identity.into(),
            path: path.into(),
        }
    }
}

/// Supplies the images of one run.
///
/// `enumerate` is called once, before the store is reset, and must report
/// identity collisions. A failure there is run-fatal. `load` failures concern a
/// single image and go through the ingestion failure policy.
pub trait ImageSource: Send + Sync {
    /// Lists every image of the run with a unique identity, in a stable order.
    fn enumerate(&self) -> CoreResult<Vec<SourceImage>>;

    /// Decodes and resizes one image into a model input tensor.
    fn load(&self, image: &SourceImage) -> CoreResult<PixelTensor>;
}
