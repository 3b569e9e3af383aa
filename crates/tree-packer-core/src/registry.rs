use crate::error::{Result, TreePackerError};
use crate::model::PackedItem;
use image::{DynamicImage, ImageReader, RgbaImage};
use std::collections::BTreeMap;
use std::path::Path;

/// Decoded pixels for one packing request, keyed by item id.
///
/// Item dimensions handed to the packer are read from the stored images, and
/// compositing looks pixels up here again once placements are known.
#[derive(Debug, Clone, Default)]
pub struct ImageRegistry {
    images: BTreeMap<String, RgbaImage>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `image` under `id`. Ids must be unique.
    pub fn insert(&mut self, id: impl Into<String>, image: RgbaImage) -> Result<()> {
        let id = id.into();
        if self.images.contains_key(&id) {
            return Err(TreePackerError::DuplicateId { id });
        }
        self.images.insert(id, image);
        Ok(())
    }

    /// Converts to RGBA8 and registers it under `id`.
    pub fn insert_image(&mut self, id: impl Into<String>, image: DynamicImage) -> Result<()> {
        self.insert(id, image.into_rgba8())
    }

    /// Decodes the file at `path` (format guessed from its contents) and registers it.
    pub fn insert_path(&mut self, id: impl Into<String>, path: impl AsRef<Path>) -> Result<()> {
        let id = id.into();
        if self.images.contains_key(&id) {
            return Err(TreePackerError::DuplicateId { id });
        }
        let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        self.images.insert(id, img.into_rgba8());
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&RgbaImage> {
        self.images.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut RgbaImage> {
        self.images.get_mut(id)
    }

    pub fn dimensions(&self, id: &str) -> Option<(u32, u32)> {
        self.images.get(id).map(RgbaImage::dimensions)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RgbaImage)> {
        self.images.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut RgbaImage)> {
        self.images.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Items to pack, sized from the current pixels.
    pub fn items(&self) -> Vec<PackedItem> {
        self.images
            .iter()
            .map(|(id, img)| PackedItem::new(id.clone(), img.width(), img.height()))
            .collect()
    }
}
