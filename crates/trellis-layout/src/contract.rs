//! The participant contract shared by elements and containers.

use smallvec::SmallVec;
use trellis_core::{Rect, Size};

/// The visible children of a participant, borrowed for one layout pass.
pub type LayoutChildren<'a> = SmallVec<[&'a mut dyn Layout; 8]>;

/// Something that can be measured and arranged by a parent's layout algorithm.
///
/// Algorithms only ever see children through this trait, so a child may
/// itself be a container running its own layout recursively.
pub trait Layout {
    /// The raw tag interpreted by the parent's algorithm.
    fn layout_tag(&self) -> u64;

    /// Children that take part in layout.
    ///
    /// Hidden children whose "collapse when hidden" flag is set are left out.
    /// The list is computed on each call; algorithms fetch it once per pass.
    fn layout_children(&mut self) -> LayoutChildren<'_>;

    /// The size stored by the last call to [`Layout::measure`].
    fn desired_size(&self) -> Size;

    fn set_desired_size(&mut self, size: Size);

    /// Compute and store a desired size for `available`.
    ///
    /// Either component of `available` may be infinite. The stored size must
    /// be finite; it may exceed `available` if the participant cannot shrink.
    fn measure(&mut self, available: Size);

    /// Occupy `final_rect`, with negative width/height treated as zero.
    fn arrange(&mut self, final_rect: Rect);
}
