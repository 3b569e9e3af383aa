use crate::model::Rect;

pub mod node;

pub use node::{LeafRef, NodeState, PackingNode};

/// A packer places rectangles into a single atlas.
///
/// Implementations must ensure no overlaps and keep every placement inside the atlas.
/// `pack` returns `None` without changing any state if the rectangle cannot be placed.
pub trait Packer {
    fn can_pack(&self, w: u32, h: u32) -> bool;
    fn pack(&mut self, id: String, w: u32, h: u32) -> Option<Rect>;
}

/// One atlas: a packing tree rooted at `(0, 0, width, height)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasTree {
    root: PackingNode,
}

impl AtlasTree {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            root: PackingNode::root(Rect::new(0, 0, width, height)),
        }
    }

    pub fn root(&self) -> &PackingNode {
        &self.root
    }

    pub fn width(&self) -> u32 {
        self.root.rect().w
    }

    pub fn height(&self) -> u32 {
        self.root.rect().h
    }

    /// True until the first successful insertion.
    pub fn is_empty(&self) -> bool {
        self.root.is_free()
    }

    pub fn occupied(&self) -> Vec<LeafRef<'_>> {
        self.root.collect_occupied()
    }
}

impl Packer for AtlasTree {
    fn can_pack(&self, w: u32, h: u32) -> bool {
        self.root.find_insertion_point(w, h).is_some()
    }

    fn pack(&mut self, id: String, w: u32, h: u32) -> Option<Rect> {
        self.root.place(id, w, h)
    }
}
