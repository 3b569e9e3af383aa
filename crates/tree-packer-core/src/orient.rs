//! Orientation normalization: items wider than tall are turned upright before
//! packing so the packer only ever sees `w <= h`.

use crate::model::PackedItem;
use crate::registry::ImageRegistry;
use image::{RgbaImage, imageops};
use std::collections::BTreeMap;
use tracing::trace;

/// Rotate iff strictly wider than tall.
pub fn needs_rotation(w: u32, h: u32) -> bool {
    w > h
}

/// Item with its packing dimensions (post-rotation) and rotation flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientedItem {
    pub id: String,
    pub w: u32,
    pub h: u32,
    pub rotated: bool,
}

impl OrientedItem {
    pub fn from_item(item: PackedItem, allow_rotation: bool) -> Self {
        if allow_rotation && needs_rotation(item.w, item.h) {
            trace!(id = %item.id, w = item.w, h = item.h, "rotating item");
            Self {
                id: item.id,
                w: item.h,
                h: item.w,
                rotated: true,
            }
        } else {
            Self {
                id: item.id,
                w: item.w,
                h: item.h,
                rotated: false,
            }
        }
    }
}

pub fn normalize(items: Vec<PackedItem>, allow_rotation: bool) -> Vec<OrientedItem> {
    items
        .into_iter()
        .map(|item| OrientedItem::from_item(item, allow_rotation))
        .collect()
}

/// Rotates pixels 90° clockwise: destination `(x, y)` takes source
/// `(y, src_h - 1 - x)`, and the result is `src_h x src_w`.
pub fn rotate90_cw(src: &RgbaImage) -> RgbaImage {
    imageops::rotate90(src)
}

/// Applies the same rule as [`normalize`] to registered pixels, rotating
/// images in place. Returns the rotation flag of every id.
pub fn normalize_registry(
    registry: &mut ImageRegistry,
    allow_rotation: bool,
) -> BTreeMap<String, bool> {
    let mut flags = BTreeMap::new();
    for (id, img) in registry.iter_mut() {
        let (w, h) = img.dimensions();
        let rotate = allow_rotation && needs_rotation(w, h);
        if rotate {
            *img = rotate90_cw(img);
        }
        flags.insert(id.to_string(), rotate);
    }
    flags
}
