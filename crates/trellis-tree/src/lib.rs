//! Element tree glue for Trellis layouts.
//!
//! This crate connects the layout algorithms to an owned tree of elements:
//!
//! 1. **Elements**: margins, alignment, visibility and scroll offsets on top
//!    of the `Layout` contract, with a default layout per element kind
//! 2. **Tree**: id lookup, invalidation of ancestors, and layout passes
//!    driven by the viewport in [`LayoutOptions`]
//! 3. **DIPs**: conversion of arranged rectangles to device pixels
//!
//! # Example
//!
//! ```ignore
//! use trellis_tree::{Element, ElementKind, ElementTree, LayoutOptions};
//!
//! let mut tree = ElementTree::new(LayoutOptions::default())?;
//! let dock = tree.insert(tree.root_id(), Element::new(ElementKind::DockPanel))?;
//! tree.insert(dock, Element::leaf(120.0, 24.0).with_tag(DockTag::Top))?;
//! tree.update_layout();
//! ```

mod dip;
mod element;
mod options;
mod tree;

pub use dip::{dip_to_px, px_to_dip, PixelRect};
pub use element::{Element, ElementKind};
pub use options::{LayoutOptions, BASE_DPI};
pub use tree::ElementTree;
