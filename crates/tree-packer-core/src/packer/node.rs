//! Binary tree that partitions one atlas into free and occupied regions.
//!
//! Every insertion turns a free leaf into an internal node with two guillotine
//! cuts: a vertical one at the item's width, then a horizontal one at the item's
//! height inside the left column. Free leaves are never merged back together.

use crate::model::Rect;

/// What a node currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeState {
    /// Leaf with no item.
    Free,
    /// Leaf exactly covering one placed item.
    Occupied { id: String },
    /// Internal node; the two children tile `rect` exactly.
    Split {
        left: Box<PackingNode>,
        right: Box<PackingNode>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackingNode {
    rect: Rect,
    path: String,
    state: NodeState,
}

/// Borrowed snapshot of a leaf, as returned by the collectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafRef<'a> {
    pub rect: Rect,
    pub path: &'a str,
    /// `Some` for occupied leaves.
    pub id: Option<&'a str>,
}

impl PackingNode {
    /// Creates a root node (a single free leaf) covering `rect`.
    pub fn root(rect: Rect) -> Self {
        Self::leaf(rect, "root".to_string())
    }

    fn leaf(rect: Rect, path: String) -> Self {
        Self {
            rect,
            path,
            state: NodeState::Free,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Branch sequence from the root (`root`, then `l`/`r` per level).
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> &NodeState {
        &self.state
    }

    pub fn id(&self) -> Option<&str> {
        match &self.state {
            NodeState::Occupied { id } => Some(id),
            _ => None,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self.state, NodeState::Free)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self.state, NodeState::Occupied { .. })
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self.state, NodeState::Split { .. })
    }

    pub fn children(&self) -> Option<(&PackingNode, &PackingNode)> {
        match &self.state {
            NodeState::Split { left, right } => Some((left, right)),
            _ => None,
        }
    }

    /// Size check only; no rotation is attempted here.
    pub fn fits(&self, w: u32, h: u32) -> bool {
        w <= self.rect.w && h <= self.rect.h
    }

    pub fn is_insertable(&self, w: u32, h: u32) -> bool {
        self.is_free() && self.fits(w, h)
    }

    /// First free leaf that can hold `w x h`, searching depth-first with the left
    /// subtree before the right one.
    ///
    /// Subtrees whose root is too small are skipped: children are never larger
    /// than their parent.
    pub fn find_insertion_point(&self, w: u32, h: u32) -> Option<&PackingNode> {
        if !self.fits(w, h) {
            return None;
        }
        match &self.state {
            NodeState::Free => Some(self),
            NodeState::Occupied { .. } => None,
            NodeState::Split { left, right } => left
                .find_insertion_point(w, h)
                .or_else(|| right.find_insertion_point(w, h)),
        }
    }

    /// Mutable counterpart of [`find_insertion_point`](Self::find_insertion_point).
    pub fn find_insertion_point_mut(&mut self, w: u32, h: u32) -> Option<&mut PackingNode> {
        if !self.fits(w, h) {
            return None;
        }
        if self.is_free() {
            return Some(self);
        }
        match &mut self.state {
            NodeState::Split { left, right } => match left.find_insertion_point_mut(w, h) {
                Some(node) => Some(node),
                None => right.find_insertion_point_mut(w, h),
            },
            _ => None,
        }
    }

    /// Places `id` and returns `true`, or returns `false` leaving the tree untouched.
    pub fn insert(&mut self, id: impl Into<String>, w: u32, h: u32) -> bool {
        self.place(id, w, h).is_some()
    }

    /// Like [`insert`](Self::insert) but returns the rectangle given to the item.
    pub fn place(&mut self, id: impl Into<String>, w: u32, h: u32) -> Option<Rect> {
        let target = self.find_insertion_point_mut(w, h)?;
        Some(target.split(id.into(), w, h))
    }

    fn split(&mut self, id: String, w: u32, h: u32) -> Rect {
        debug_assert!(self.is_insertable(w, h));
        let r = self.rect;

        // vertical cut: left column is exactly `w` wide, right keeps the rest
        let column_path = format!("{}l", self.path);
        let remainder = Self::leaf(
            Rect::new(r.x + w, r.y, r.w - w, r.h),
            format!("{}r", self.path),
        );

        // horizontal cut of the column: item on top, free strip below
        let placed = Rect::new(r.x, r.y, w, h);
        let cell = PackingNode {
            rect: placed,
            path: format!("{column_path}l"),
            state: NodeState::Occupied { id },
        };
        let below = Self::leaf(
            Rect::new(r.x, r.y + h, w, r.h - h),
            format!("{column_path}r"),
        );
        let column = PackingNode {
            rect: Rect::new(r.x, r.y, w, r.h),
            path: column_path,
            state: NodeState::Split {
                left: Box::new(cell),
                right: Box::new(below),
            },
        };

        self.state = NodeState::Split {
            left: Box::new(column),
            right: Box::new(remainder),
        };
        placed
    }

    /// All leaves, depth-first, left before right.
    pub fn leaves(&self) -> Vec<LeafRef<'_>> {
        let mut out = Vec::new();
        self.push_leaves(&mut out);
        out
    }

    fn push_leaves<'a>(&'a self, out: &mut Vec<LeafRef<'a>>) {
        match &self.state {
            NodeState::Split { left, right } => {
                left.push_leaves(out);
                right.push_leaves(out);
            }
            NodeState::Free => out.push(LeafRef {
                rect: self.rect,
                path: &self.path,
                id: None,
            }),
            NodeState::Occupied { id } => out.push(LeafRef {
                rect: self.rect,
                path: &self.path,
                id: Some(id),
            }),
        }
    }

    pub fn collect_occupied(&self) -> Vec<LeafRef<'_>> {
        self.leaves().into_iter().filter(|l| l.id.is_some()).collect()
    }

    /// Includes zero-area remainder leaves left by exact-width or exact-height cuts.
    pub fn collect_free(&self) -> Vec<LeafRef<'_>> {
        self.leaves().into_iter().filter(|l| l.id.is_none()).collect()
    }

    pub fn node_count(&self) -> usize {
        match &self.state {
            NodeState::Split { left, right } => 1 + left.node_count() + right.node_count(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles_exactly(node: &PackingNode) -> bool {
        match node.children() {
            None => true,
            Some((l, r)) => {
                let parent = node.rect();
                parent.contains(&l.rect())
                    && parent.contains(&r.rect())
                    && !l.rect().intersects(&r.rect())
                    && l.rect().area() + r.rect().area() == parent.area()
                    && tiles_exactly(l)
                    && tiles_exactly(r)
            }
        }
    }

    #[test]
    fn root_is_free_leaf() {
        let n = PackingNode::root(Rect::new(0, 0, 64, 32));
        assert!(n.is_free());
        assert!(n.is_leaf());
        assert_eq!(n.path(), "root");
        assert_eq!(n.node_count(), 1);
        assert!(n.fits(64, 32));
        assert!(!n.fits(65, 32));
        assert!(!n.fits(64, 33));
    }

    #[test]
    fn insert_splits_column_then_cell() {
        let mut n = PackingNode::root(Rect::new(0, 0, 100, 100));
        assert_eq!(n.place("a", 30, 20), Some(Rect::new(0, 0, 30, 20)));
        assert_eq!(n.node_count(), 5);

        let occupied = n.collect_occupied();
        assert_eq!(occupied.len(), 1);
        assert_eq!(occupied[0].id, Some("a"));
        assert_eq!(occupied[0].path, "rootll");

        let free = n.collect_free();
        let got: Vec<(Rect, &str)> = free.iter().map(|l| (l.rect, l.path)).collect();
        assert_eq!(
            got,
            vec![
                (Rect::new(0, 20, 30, 80), "rootlr"),
                (Rect::new(30, 0, 70, 100), "rootr"),
            ]
        );
        assert!(tiles_exactly(&n));
    }

    #[test]
    fn first_fit_prefers_left_subtree() {
        let mut n = PackingNode::root(Rect::new(0, 0, 100, 100));
        assert!(n.insert("a", 30, 20));
        // both the strip below "a" and the right column can hold it; left wins
        assert_eq!(n.place("b", 10, 10), Some(Rect::new(0, 20, 10, 10)));
        // too wide for anything under the first column
        assert_eq!(n.place("c", 40, 10), Some(Rect::new(30, 0, 40, 10)));
        assert!(tiles_exactly(&n));
    }

    #[test]
    fn failed_insert_leaves_tree_untouched() {
        let mut n = PackingNode::root(Rect::new(0, 0, 50, 50));
        assert!(n.insert("a", 50, 30));
        let before = n.clone();
        assert!(!n.insert("b", 10, 30));
        assert_eq!(n, before);
        assert!(n.find_insertion_point(10, 30).is_none());
        assert!(n.insert("c", 50, 20));
        assert!(n.find_insertion_point(1, 1).is_none());
    }

    #[test]
    fn full_width_item_leaves_degenerate_remainder() {
        let mut n = PackingNode::root(Rect::new(0, 0, 100, 100));
        assert!(n.insert("a", 100, 40));
        let free = n.collect_free();
        assert!(free.iter().any(|l| l.rect == Rect::new(100, 0, 0, 100)));
        assert_eq!(n.place("b", 100, 10), Some(Rect::new(0, 40, 100, 10)));
    }

    #[test]
    fn occupied_leaf_matches_item_size() {
        let mut n = PackingNode::root(Rect::new(0, 0, 128, 128));
        let placed: Vec<Rect> = [(40, 60), (40, 40), (20, 70), (68, 10)]
            .into_iter()
            .enumerate()
            .map(|(i, (w, h))| n.place(format!("i{i}"), w, h).expect("fits"))
            .collect();
        assert_eq!(placed[1], Rect::new(0, 60, 40, 40));
        assert_eq!(placed[2], Rect::new(40, 0, 20, 70));
        assert_eq!(placed[3], Rect::new(60, 0, 68, 10));

        let occupied: u64 = n.collect_occupied().iter().map(|l| l.rect.area()).sum();
        let free: u64 = n.collect_free().iter().map(|l| l.rect.area()).sum();
        assert_eq!(occupied, 40 * 60 + 40 * 40 + 20 * 70 + 68 * 10);
        assert_eq!(occupied + free, 128 * 128);
        assert!(tiles_exactly(&n));
    }
}
