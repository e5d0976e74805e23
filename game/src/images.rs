use std::path::{Path, PathBuf};

use engine::image::RgbaImage;
use log::{info, warn};

/// One registered image. `image` is `None` when the source could not be decoded.
#[derive(Debug, Clone)]
pub struct ImageRef {
    pub source: PathBuf,
    pub image: Option<RgbaImage>,
}

impl ImageRef {
    pub fn is_resolved(&self) -> bool {
        self.image.is_some()
    }
}

/// Ordered, append-only list of piece images.
///
/// Indices handed out at spawn time stay valid for the whole process, including across
/// restarts, so entries are never removed. A bad file still takes a slot and simply renders
/// as flat color.
#[derive(Debug, Clone, Default)]
pub struct ImageRegistry {
    entries: Vec<ImageRef>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a PNG and appends it. Returns the index of the new entry.
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> usize {
        let path = path.as_ref();
        let image = match RgbaImage::load_png(path) {
            Ok(image) => {
                info!(
                    "registered image {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                Some(image)
            }
            Err(err) => {
                warn!("image {} unusable, falling back to color: {err}", path.display());
                None
            }
        };
        self.push(ImageRef {
            source: path.to_path_buf(),
            image,
        })
    }

    pub fn add_image(&mut self, source: impl Into<PathBuf>, image: RgbaImage) -> usize {
        self.push(ImageRef {
            source: source.into(),
            image: Some(image),
        })
    }

    fn push(&mut self, entry: ImageRef) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageRef> {
        self.entries.get(index)
    }

    /// The decoded pixels behind `index`, if the slot exists and decoded.
    pub fn resolve(&self, index: usize) -> Option<&RgbaImage> {
        self.entries.get(index)?.image.as_ref()
    }
}
