//! Layout computation for Trellis containers.
//!
//! Every participant implements the [`Layout`] contract. A container owns a
//! [`LayoutHost`] that runs one of the layout algorithms over its visible
//! children in two phases:
//!
//! 1. **Measure**: bottom-up, each child reports a desired size for an
//!    available size hint (which may be infinite on either axis).
//! 2. **Arrange**: top-down, the algorithm partitions the final rectangle and
//!    arranges each child into its slot.
//!
//! Each child carries an opaque 64-bit layout tag whose meaning is defined by
//! the algorithm of its parent (see [`tag`]).
//!
//! # Example
//!
//! ```ignore
//! use trellis_layout::{DockLayout, LayoutHost};
//!
//! let mut host = LayoutHost::from(DockLayout::default());
//! host.measure(&mut panel, Size::new(800.0, 600.0));
//! host.arrange(&mut panel, Rect::new(0.0, 0.0, 800.0, 600.0));
//! ```

mod canvas;
mod contract;
mod dock;
mod fill;
mod grid;
mod host;
mod stack;
pub mod tag;
mod uniform_grid;
mod wrap;

#[cfg(test)]
mod test_support;

pub use canvas::CanvasLayout;
pub use contract::{Layout, LayoutChildren};
pub use dock::DockLayout;
pub use fill::FillLayout;
pub use grid::{GridLayout, GridTrack, TrackKind};
pub use host::{LayoutAlgorithm, LayoutHost};
pub use stack::{Orientation, StackLayout};
pub use tag::{CanvasTag, DockTag, GridTag};
pub use uniform_grid::UniformGridLayout;
pub use wrap::WrapLayout;
