//! Stack layout and the orientation shared with wrap.

use trellis_core::{Rect, Size};

use crate::contract::Layout;
use crate::host::LayoutAlgorithm;

/// Direction children are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Left to right
    Horizontal,
    /// Top to bottom
    Vertical,
}

impl Orientation {
    /// Extent of `size` along the layout axis.
    pub(crate) fn main(self, size: Size) -> f64 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    /// Extent of `size` across the layout axis.
    pub(crate) fn cross(self, size: Size) -> f64 {
        match self {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }

    pub(crate) fn size(self, main: f64, cross: f64) -> Size {
        match self {
            Orientation::Horizontal => Size::new(main, cross),
            Orientation::Vertical => Size::new(cross, main),
        }
    }

    pub(crate) fn rect(self, main_offset: f64, cross_offset: f64, main: f64, cross: f64) -> Rect {
        match self {
            Orientation::Horizontal => Rect::new(main_offset, cross_offset, main, cross),
            Orientation::Vertical => Rect::new(cross_offset, main_offset, cross, main),
        }
    }
}

/// Lines children up one after another.
///
/// Each child gets its desired extent along the axis and the full extent
/// across it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackLayout {
    pub orientation: Orientation,
}

impl Default for StackLayout {
    fn default() -> Self {
        Self::vertical()
    }
}

impl StackLayout {
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    /// Create a left-to-right stack.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Create a top-to-bottom stack.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }
}

impl LayoutAlgorithm for StackLayout {
    fn measure_override(&mut self, children: &mut [&mut dyn Layout], available: Size) -> Size {
        let axis = self.orientation;
        let constraint = axis.size(f64::INFINITY, axis.cross(available));

        let mut main = 0.0;
        let mut cross: f64 = 0.0;
        for child in children.iter_mut() {
            child.measure(constraint);
            let size = child.desired_size();
            main += axis.main(size);
            cross = cross.max(axis.cross(size));
        }
        axis.size(main, cross)
    }

    fn arrange_override(&mut self, children: &mut [&mut dyn Layout], final_size: Size) {
        let axis = self.orientation;
        let cross = axis.cross(final_size);

        let mut offset = 0.0;
        for child in children.iter_mut() {
            let main = axis.main(child.desired_size());
            child.arrange(axis.rect(offset, 0.0, main, cross));
            offset += main;
        }
    }
}
