use crate::compositing::compose;
use crate::config::PackerConfig;
use crate::error::{Result, TreePackerError};
use crate::model::{AtlasResult, PackStats, PackedItem};
use crate::orient::{OrientedItem, normalize, normalize_registry};
use crate::packer::{AtlasTree, Packer};
use crate::registry::ImageRegistry;
use image::RgbaImage;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, trace};

/// Composited atlas canvas and the placements it was drawn from.
pub struct OutputPage {
    pub result: AtlasResult,
    pub rgba: RgbaImage,
}

/// Output of an image packing run, one page per atlas in creation order.
pub struct PackOutput {
    pub pages: Vec<OutputPage>,
}

impl PackOutput {
    pub fn results(&self) -> Vec<&AtlasResult> {
        self.pages.iter().map(|p| &p.result).collect()
    }

    pub fn stats(&self) -> PackStats {
        PackStats::from_results(self.pages.iter().map(|p| &p.result))
    }
}

/// Packs `(id, width, height)` tuples. See [`pack_items`].
pub fn pack<K: Into<String>>(items: Vec<(K, u32, u32)>, cfg: &PackerConfig) -> Result<Vec<AtlasResult>> {
    let items = items
        .into_iter()
        .map(|(id, w, h)| PackedItem::new(id, w, h))
        .collect();
    pack_items(items, cfg)
}

/// Packs items into as many `max_width x max_height` atlases as needed and
/// returns one result per atlas, in creation order.
///
/// Notes:
/// - Items wider than tall are rotated first when `allow_rotation` is set.
/// - Items are placed tallest first; equal heights are ordered by id, so the
///   output is deterministic.
/// - Each item goes into the oldest atlas that accepts it; a new atlas is opened
///   only when none does.
/// - Either every item is placed or an error is returned; there are no partial results.
#[instrument(skip_all, fields(items = items.len(), max_width = cfg.max_width, max_height = cfg.max_height))]
pub fn pack_items(items: Vec<PackedItem>, cfg: &PackerConfig) -> Result<Vec<AtlasResult>> {
    cfg.validate()?;

    if items.is_empty() {
        return Err(TreePackerError::EmptyInput);
    }
    validate_items(&items)?;

    let mut oriented = normalize(items, cfg.allow_rotation);
    sort_for_packing(&mut oriented);

    // only the tallest item is checked up front
    let first = &oriented[0];
    let probe = AtlasTree::new(cfg.max_width, cfg.max_height);
    if !probe.root().fits(first.w, first.h) {
        return Err(TreePackerError::ItemExceedsAtlas {
            id: first.id.clone(),
            width: first.w,
            height: first.h,
        });
    }

    let atlases = place_all(&oriented, || {
        AtlasTree::new(cfg.max_width, cfg.max_height)
    })?;

    let rotations: HashMap<String, bool> = oriented
        .iter()
        .map(|it| (it.id.clone(), it.rotated))
        .collect();
    let results: Vec<AtlasResult> = atlases
        .iter()
        .filter(|a| !a.is_empty())
        .enumerate()
        .map(|(i, a)| AtlasResult::from_tree(i, a, &rotations))
        .collect();
    debug!(atlases = results.len(), "packing finished");
    Ok(results)
}

/// Places `items` in order, trying existing atlases oldest first and opening a
/// new one from `new_atlas` when none accepts the item.
pub fn place_all<P, F>(items: &[OrientedItem], new_atlas: F) -> Result<Vec<P>>
where
    P: Packer,
    F: Fn() -> P,
{
    let mut atlases = vec![new_atlas()];
    for item in items {
        let placed = atlases
            .iter_mut()
            .enumerate()
            .find_map(|(i, a)| a.pack(item.id.clone(), item.w, item.h).map(|r| (i, r)));
        if let Some((i, rect)) = placed {
            trace!(id = %item.id, atlas = i, x = rect.x, y = rect.y, "placed");
            continue;
        }

        let mut fresh = new_atlas();
        let Some(rect) = fresh.pack(item.id.clone(), item.w, item.h) else {
            return Err(TreePackerError::InsertionFailed {
                id: item.id.clone(),
            });
        };
        debug!(id = %item.id, atlas = atlases.len(), "opened new atlas");
        trace!(id = %item.id, atlas = atlases.len(), x = rect.x, y = rect.y, "placed");
        atlases.push(fresh);
    }
    Ok(atlases)
}

/// Height descending, then id ascending.
pub fn sort_for_packing(items: &mut [OrientedItem]) {
    items.sort_by(|a, b| b.h.cmp(&a.h).then_with(|| a.id.cmp(&b.id)));
}

fn validate_items(items: &[PackedItem]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());
    for it in items {
        if it.w == 0 || it.h == 0 {
            return Err(TreePackerError::InvalidDimensions {
                id: it.id.clone(),
                width: it.w,
                height: it.h,
            });
        }
        if !seen.insert(it.id.as_str()) {
            return Err(TreePackerError::DuplicateId { id: it.id.clone() });
        }
    }
    Ok(())
}

/// Packs every image of `registry` and composites one RGBA canvas per atlas.
///
/// Wide images are rotated in the registry before compositing, so each canvas
/// holds pixels in their packed orientation.
#[instrument(skip_all, fields(images = registry.len()))]
pub fn pack_images(mut registry: ImageRegistry, cfg: &PackerConfig) -> Result<PackOutput> {
    let results = pack_items(registry.items(), cfg)?;
    let rotations = normalize_registry(&mut registry, cfg.allow_rotation);
    debug_assert!(results.iter().all(|r| {
        r.rotated
            .iter()
            .all(|(id, rot)| rotations.get(id) == Some(rot))
    }));

    let mut pages = Vec::with_capacity(results.len());
    for result in results {
        let rgba = compose(&result, &registry, cfg)?;
        debug!(
            atlas = result.index,
            width = rgba.width(),
            height = rgba.height(),
            "composited atlas"
        );
        pages.push(OutputPage { result, rgba });
    }
    Ok(PackOutput { pages })
}
