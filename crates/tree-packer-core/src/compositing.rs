use crate::config::PackerConfig;
use crate::error::{Result, TreePackerError};
use crate::model::AtlasResult;
use crate::pow2::pad_to_pow2;
use crate::registry::ImageRegistry;
use image::{RgbaImage, imageops};

/// Canvas size for `result`: its bounding rect, optionally padded to powers of two.
pub fn canvas_size(result: &AtlasResult, cfg: &PackerConfig) -> (u32, u32) {
    let w = result.bounding_rect.w.max(1);
    let h = result.bounding_rect.h.max(1);
    if cfg.power_of_two {
        (pad_to_pow2(w).unwrap_or(w), pad_to_pow2(h).unwrap_or(h))
    } else {
        (w, h)
    }
}

/// Draws every item of `result` onto a transparent canvas.
///
/// Registry images must already be in packed orientation (see
/// [`normalize_registry`](crate::orient::normalize_registry)); an image whose size
/// differs from its placement is rejected.
pub fn compose(result: &AtlasResult, registry: &ImageRegistry, cfg: &PackerConfig) -> Result<RgbaImage> {
    let (w, h) = canvas_size(result, cfg);
    let mut canvas = RgbaImage::new(w, h);
    for (id, rect) in &result.rects {
        let src = registry
            .get(id)
            .ok_or_else(|| TreePackerError::MissingImage { id: id.clone() })?;
        if src.dimensions() != (rect.w, rect.h) {
            return Err(TreePackerError::InvalidDimensions {
                id: id.clone(),
                width: src.width(),
                height: src.height(),
            });
        }
        imageops::replace(&mut canvas, src, rect.x as i64, rect.y as i64);
    }
    Ok(canvas)
}
