use crate::packer::AtlasTree;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge coordinate (`x + w`).
    pub fn right(&self) -> u32 {
        self.x + self.w
    }
    /// Exclusive bottom edge coordinate (`y + h`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }
    pub fn area(&self) -> u64 {
        (self.w as u64) * (self.h as u64)
    }
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
    /// Returns true if `r` is fully inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    /// Returns true if the two rectangles share at least one pixel.
    pub fn intersects(&self, r: &Rect) -> bool {
        !(self.x >= r.right() || r.x >= self.right() || self.y >= r.bottom() || r.y >= self.bottom())
    }
}

/// Caller-supplied item to pack. `id` must be unique within one packing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedItem {
    pub id: String,
    pub w: u32,
    pub h: u32,
}

impl PackedItem {
    pub fn new(id: impl Into<String>, w: u32, h: u32) -> Self {
        Self { id: id.into(), w, h }
    }
}

/// Placements of one atlas, in the order the atlases were created.
///
/// `bounding_rect` is anchored at the origin and is the tightest rectangle that
/// encloses every placed item. Rects are post-rotation: a rotated item's `w`
/// is its original height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasResult {
    pub index: usize,
    pub bounding_rect: Rect,
    pub rects: BTreeMap<String, Rect>,
    pub rotated: BTreeMap<String, bool>,
}

impl AtlasResult {
    /// Snapshots the occupied leaves of a finished atlas.
    ///
    /// `rotations` holds the flag of every packed id; ids missing from it are
    /// reported as not rotated.
    pub fn from_tree(index: usize, tree: &AtlasTree, rotations: &HashMap<String, bool>) -> Self {
        let mut rects = BTreeMap::new();
        let mut rotated = BTreeMap::new();
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        for leaf in tree.occupied() {
            let Some(id) = leaf.id else { continue };
            max_x = max_x.max(leaf.rect.right());
            max_y = max_y.max(leaf.rect.bottom());
            rects.insert(id.to_string(), leaf.rect);
            rotated.insert(id.to_string(), rotations.get(id).copied().unwrap_or(false));
        }
        Self {
            index,
            bounding_rect: Rect::new(0, 0, max_x, max_y),
            rects,
            rotated,
        }
    }

    pub fn rect(&self, id: &str) -> Option<Rect> {
        self.rects.get(id).copied()
    }

    /// `false` for ids not placed in this atlas.
    pub fn is_rotated(&self, id: &str) -> bool {
        self.rotated.get(id).copied().unwrap_or(false)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rects.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rects.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Sum of the areas of all placed items.
    pub fn used_area(&self) -> u64 {
        self.rects.values().map(Rect::area).sum()
    }
}

/// Statistics about packing efficiency across all atlases of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackStats {
    /// Total number of atlases produced.
    pub num_atlases: usize,
    /// Total number of items placed.
    pub num_items: usize,
    /// Number of items that were rotated before placement.
    pub num_rotated: usize,
    /// Sum of bounding rect areas.
    pub total_area: u64,
    /// Sum of placed item areas.
    pub used_area: u64,
    /// used_area / total_area (0.0 to 1.0).
    pub occupancy: f64,
}

impl PackStats {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a AtlasResult>) -> Self {
        let mut num_atlases = 0;
        let mut num_items = 0;
        let mut num_rotated = 0;
        let mut total_area = 0u64;
        let mut used_area = 0u64;
        for r in results {
            num_atlases += 1;
            num_items += r.len();
            num_rotated += r.rotated.values().filter(|&&v| v).count();
            total_area += r.bounding_rect.area();
            used_area += r.used_area();
        }
        let occupancy = if total_area > 0 {
            used_area as f64 / total_area as f64
        } else {
            0.0
        };
        Self {
            num_atlases,
            num_items,
            num_rotated,
            total_area,
            used_area,
            occupancy,
        }
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Atlases: {}, Items: {}, Occupancy: {:.2}%, Total Area: {} px², Used Area: {} px², Rotated: {}",
            self.num_atlases,
            self.num_items,
            self.occupancy * 100.0,
            self.total_area,
            self.used_area,
            self.num_rotated,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.total_area.saturating_sub(self.used_area)
    }
}
