//! In-memory image source.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};
use crate::traits::{ImageSource, SourceImage};
use crate::types::PixelTensor;

#[derive(Debug, Clone)]
enum Entry {
    Tensor(PixelTensor),
    Broken(String),
}

/// Image source over a fixed list of tensors.
///
/// Entries keep insertion order. A "broken" entry fails to load with
/// `CoreError::ImageDecode`, like a corrupt file would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageSource {
    order: Vec<SourceImage>,
    entries: HashMap<String, Entry>,
}

impl InMemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, identity: &str, tensor: PixelTensor) -> Self {
        self.push(identity, Entry::Tensor(tensor));
        self
    }

    /// Adds an image whose load fails with `message`.
    pub fn with_broken(mut self, identity: &str, message: &str) -> Self {
        self.push(identity, Entry::Broken(message.to_string()));
        self
    }

    fn push(&mut self, identity: &str, entry: Entry) {
        self.order.push(SourceImage::new(
            identity,
            PathBuf::from("memory").join(identity),
        ));
        self.entries.insert(identity.to_string(), entry);
    }
}

impl ImageSource for InMemoryImageSource {
    fn enumerate(&self) -> CoreResult<Vec<SourceImage>> {
        let mut seen: HashMap<&str, &SourceImage> = HashMap::new();
        for image in &self.order {
            if let Some(first) = seen.insert(image.identity.as_str(), image) {
                return Err(CoreError::IdentityCollision {
                    identity: image.identity.clone(),
                    first: first.path.display().to_string(),
                    second: image.path.display().to_string(),
                });
            }
        }
        Ok(self.order.clone())
    }

    fn load(&self, image: &SourceImage) -> CoreResult<PixelTensor> {
        match self.entries.get(&image.identity) {
            Some(Entry::Tensor(t)) => Ok(t.clone()),
            Some(Entry::Broken(message)) => Err(CoreError::ImageDecode {
                path: image.path.display().to_string(),
                message: message.clone(),
            }),
            None => Err(CoreError::ImageDecode {
                path: image.path.display().to_string(),
                message: "no such image".to_string(),
            }),
        }
    }
}
