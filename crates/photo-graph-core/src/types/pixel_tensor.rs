//! Model input tensors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Height, width and channel count of a model input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputShape {
    pub height: u32,
    pub width: u32,
    pub channels: u32,
}

impl InputShape {
    pub const fn new(height: u32, width: u32, channels: u32) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }

    /// Number of scalar elements in a tensor of this shape.
    pub fn element_count(&self) -> usize {
        self.height as usize * self.width as usize * self.channels as usize
    }
}

impl Default for InputShape {
    fn default() -> Self {
        Self::new(224, 224, 3)
    }
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.height, self.width, self.channels)
    }
}

/// Decoded, resized image scaled to `[0, 1]`, laid out row-major as
/// `[height][width][channels]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelTensor {
    shape: InputShape,
    data: Vec<f32>,
}

impl PixelTensor {
    /// Wraps `data`, checking that its length matches `shape`.
    pub fn new(shape: InputShape, data: Vec<f32>) -> CoreResult<Self> {
        if data.len() != shape.element_count() {
            return Err(CoreError::Internal(format!(
                "tensor of shape {} needs {} values, got {}",
                shape,
                shape.element_count(),
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    #[inline]
    pub fn shape(&self) -> InputShape {
        self.shape
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Nested `[height][width][channels]` view used by JSON model endpoints.
    pub fn to_nested(&self) -> Vec<Vec<Vec<f32>>> {
        let w = self.shape.width as usize;
        let c = self.shape.channels as usize;
        if w == 0 || c == 0 {
            return Vec::new();
        }
        self.data
            .chunks(w * c)
            .map(|row| row.chunks(c).map(|px| px.to_vec()).collect())
            .collect()
    }
}
