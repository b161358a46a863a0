//! Wrap layout: a stack that breaks onto a new line when the current one is full.

use smallvec::SmallVec;
use trellis_core::Size;

use crate::contract::Layout;
use crate::host::LayoutAlgorithm;
use crate::stack::{Orientation, StackLayout};

/// Flows children along the layout axis, wrapping onto new lines.
///
/// Lines are stacked across the axis; each line is as thick as its thickest
/// child. When the axis is unconstrained nothing ever wraps and the result
/// is the same as a [`StackLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapLayout {
    pub orientation: Orientation,
}

impl Default for WrapLayout {
    fn default() -> Self {
        Self::horizontal()
    }
}

impl WrapLayout {
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    /// Create a layout that fills rows left to right.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Create a layout that fills columns top to bottom.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    fn as_stack(&self) -> StackLayout {
        StackLayout::new(self.orientation)
    }
}

/// One line of children, ending before `end`.
#[derive(Debug, Clone, Copy)]
struct Line {
    end: usize,
    cross: f64,
}

/// Split children into lines no longer than `limit` along `axis`.
///
/// A child that does not fit starts a new line; a child on an empty line is
/// always accepted, even when it alone is longer than `limit`.
fn break_lines(axis: Orientation, children: &[&mut dyn Layout], limit: f64) -> SmallVec<[Line; 4]> {
    let mut lines = SmallVec::new();
    let mut line = Line { end: 0, cross: 0.0 };
    let mut line_main = 0.0;
    let mut line_start = 0;

    for (index, child) in children.iter().enumerate() {
        let size = child.desired_size();
        let main = axis.main(size);
        if index > line_start && line_main + main > limit {
            line.end = index;
            lines.push(line);
            line = Line { end: 0, cross: 0.0 };
            line_main = 0.0;
            line_start = index;
        }
        line_main += main;
        line.cross = line.cross.max(axis.cross(size));
    }
    line.end = children.len();
    lines.push(line);
    lines
}

impl LayoutAlgorithm for WrapLayout {
    fn measure_override(&mut self, children: &mut [&mut dyn Layout], available: Size) -> Size {
        let axis = self.orientation;
        let limit = axis.main(available);
        if limit.is_infinite() {
            return self.as_stack().measure_override(children, available);
        }

        let mut lines_cross = 0.0;
        let mut line_main = 0.0;
        let mut line_cross: f64 = 0.0;
        let mut longest: f64 = 0.0;
        let mut line_is_empty = true;

        for child in children.iter_mut() {
            child.measure(axis.size((limit - line_main).max(0.0), f64::INFINITY));
            let size = child.desired_size();
            let main = axis.main(size);

            if line_is_empty || line_main + main <= limit {
                line_main += main;
                line_cross = line_cross.max(axis.cross(size));
            } else {
                lines_cross += line_cross;
                line_main = main;
                line_cross = axis.cross(size);
            }
            line_is_empty = false;
            longest = longest.max(line_main);
        }

        axis.size(longest, lines_cross + line_cross)
    }

    fn arrange_override(&mut self, children: &mut [&mut dyn Layout], final_size: Size) {
        let axis = self.orientation;
        let limit = axis.main(final_size);
        if limit.is_infinite() {
            self.as_stack().arrange_override(children, final_size);
            return;
        }

        let lines = break_lines(axis, children, limit);

        let mut start = 0;
        let mut cross_offset = 0.0;
        for line in lines {
            let mut main_offset = 0.0;
            for child in children[start..line.end].iter_mut() {
                let main = axis.main(child.desired_size());
                child.arrange(axis.rect(main_offset, cross_offset, main, line.cross));
                main_offset += main;
            }
            cross_offset += line.cross;
            start = line.end;
        }
    }
}
