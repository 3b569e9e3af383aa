//! Core library for packing images into fixed-size atlases with a binary-tree
//! guillotine packer.
//!
//! - Items wider than tall are rotated 90° before packing.
//! - Items are placed tallest first, each into the oldest atlas with a free leaf
//!   that fits (first fit, left subtree first). New atlases are opened on overflow.
//! - `pack` works on sizes only; `pack_images` also rotates and composites pixels.
//!
//! Quick example:
//! ```
//! use tree_packer_core::{PackerConfig, pack};
//! let cfg = PackerConfig::builder().with_max_dimensions(256, 256).build();
//! let results = pack(vec![("a", 100, 50), ("b", 40, 40)], &cfg).unwrap();
//! assert_eq!(results.len(), 1);
//! assert!(results[0].is_rotated("a"));
//! assert_eq!(results[0].rect("a").map(|r| (r.w, r.h)), Some((50, 100)));
//! ```

pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod orient;
pub mod packer;
pub mod pipeline;
pub mod pow2;
pub mod registry;

pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use pipeline::*;
pub use pow2::*;
pub use registry::ImageRegistry;

/// Convenience prelude for common types and functions.
/// Importing `tree_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{PackerConfig, PackerConfigBuilder};
    pub use crate::error::{Result, TreePackerError};
    pub use crate::model::{AtlasResult, PackStats, PackedItem, Rect};
    pub use crate::packer::{AtlasTree, Packer, PackingNode};
    pub use crate::registry::ImageRegistry;
    pub use crate::{OutputPage, PackOutput, pack, pack_images, pack_items, pad_to_pow2};
}
