//! Recursive directory image source.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use photo_graph_core::config::{Config, IdentityMode};
use photo_graph_core::{CoreError, CoreResult, ImageSource, PixelTensor, SourceImage};
use tracing::{debug, info};

use crate::image_processor::ImageProcessor;

/// Image source over every matching file below a root directory.
///
/// Files are matched by extension, case-insensitively. Enumeration order is
/// the sorted path order, so runs over the same tree are reproducible.
#[derive(Debug, Clone)]
pub struct DirectoryImageSource {
    root: PathBuf,
    extensions: Vec<String>,
    identity: IdentityMode,
    processor: ImageProcessor,
}

impl DirectoryImageSource {
    pub fn new(
        root: impl Into<PathBuf>,
        extensions: &[String],
        identity: IdentityMode,
        processor: ImageProcessor,
    ) -> Self {
        Self {
            root: root.into(),
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            identity,
            processor,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.source.root,
            &config.source.extensions,
            config.source.identity,
            ImageProcessor::from_config(&config.embedding, &config.source),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_ascii_lowercase();
                self.extensions.iter().any(|x| *x == e)
            })
            .unwrap_or(false)
    }

    /// Every accepted file below the root, sorted.
    fn walk(&self) -> CoreResult<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(CoreError::Source {
                path: self.root.display().to_string(),
                message: "not a directory".to_string(),
            });
        }

        let mut files = Vec::new();
        let mut pending = vec![self.root.clone()];
        while let Some(dir) = pending.pop() {
            let entries = fs::read_dir(&dir).map_err(|e| source_error(&dir, e))?;
            for entry in entries {
                let entry = entry.map_err(|e| source_error(&dir, e))?;
                let path = entry.path();
                let file_type = entry.file_type().map_err(|e| source_error(&path, e))?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if (file_type.is_file() || (file_type.is_symlink() && path.is_file()))
                    && self.accepts(&path)
                {
                    files.push(path);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    fn identity_for(&self, path: &Path) -> CoreResult<String> {
        match self.identity {
            IdentityMode::FileName => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| CoreError::Source {
                    path: path.display().to_string(),
                    message: "path has no file name".to_string(),
                }),
            IdentityMode::RelativePath => {
                let relative = path.strip_prefix(&self.root).map_err(|_| CoreError::Source {
                    path: path.display().to_string(),
                    message: "path is outside the source root".to_string(),
                })?;
                Ok(relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/"))
            }
        }
    }
}

fn source_error(path: &Path, err: std::io::Error) -> CoreError {
    CoreError::Source {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

impl ImageSource for DirectoryImageSource {
    fn enumerate(&self) -> CoreResult<Vec<SourceImage>> {
        let files = self.walk()?;
        let mut seen: HashMap<String, PathBuf> = HashMap::with_capacity(files.len());
        let mut images = Vec::with_capacity(files.len());

        for path in files {
            let identity = self.identity_for(&path)?;
            if let Some(first) = seen.get(&identity) {
                return Err(CoreError::IdentityCollision {
                    identity,
                    first: first.display().to_string(),
                    second: path.display().to_string(),
                });
            }
            seen.insert(identity.clone(), path.clone());
            debug!(%identity, path = %path.display(), "Found image");
            images.push(SourceImage::new(identity, path));
        }

        info!(root = %self.root.display(), images = images.len(), "Enumerated images");
        Ok(images)
    }

    fn load(&self, image: &SourceImage) -> CoreResult<PixelTensor> {
        self.processor.preprocess_path(&image.path)
    }
}
