//! Dock layout.
//!
//! Children attach in order to an edge of the remaining area, each one
//! shrinking it. The side comes from the child's [`DockTag`].

use tracing::debug;
use trellis_core::{Point, Rect, Size};

use crate::contract::Layout;
use crate::host::LayoutAlgorithm;
use crate::tag::DockTag;

/// Docks children against the edges of the remaining area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockLayout {
    /// The last child receives whatever area is left, whatever its desired size.
    pub last_child_fill: bool,
}

impl Default for DockLayout {
    fn default() -> Self {
        Self {
            last_child_fill: true,
        }
    }
}

impl DockLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the last child fills the remaining area.
    pub fn with_last_child_fill(mut self, fill: bool) -> Self {
        self.last_child_fill = fill;
        self
    }
}

fn dock_side(child: &dyn Layout) -> DockTag {
    let raw = child.layout_tag();
    if !DockTag::is_valid_raw(raw) {
        debug!(raw, "dock tag out of range, docking left");
    }
    DockTag::from(raw)
}

impl LayoutAlgorithm for DockLayout {
    fn measure_override(&mut self, children: &mut [&mut dyn Layout], available: Size) -> Size {
        let mut remaining = available;
        for child in children.iter_mut() {
            child.measure(remaining);
            let size = child.desired_size();
            match dock_side(&**child) {
                DockTag::Left | DockTag::Right => {
                    remaining.width = (remaining.width - size.width).max(0.0);
                }
                DockTag::Top | DockTag::Bottom => {
                    remaining.height = (remaining.height - size.height).max(0.0);
                }
            }
        }

        // Walk back from the innermost child: each edge adds its extent along
        // its axis and must be at least as long as everything inside it.
        let mut desired = Size::ZERO;
        for child in children.iter().rev() {
            let size = child.desired_size();
            match DockTag::from(child.layout_tag()) {
                DockTag::Left | DockTag::Right => {
                    desired.width += size.width;
                    desired.height = desired.height.max(size.height);
                }
                DockTag::Top | DockTag::Bottom => {
                    desired.height += size.height;
                    desired.width = desired.width.max(size.width);
                }
            }
        }
        desired
    }

    fn arrange_override(&mut self, children: &mut [&mut dyn Layout], final_size: Size) {
        let mut remaining = Rect::from_origin_size(Point::ZERO, final_size);
        let last = children.len().saturating_sub(1);

        for (index, child) in children.iter_mut().enumerate() {
            if self.last_child_fill && index == last {
                child.arrange(remaining);
                break;
            }

            let size = child.desired_size();
            match dock_side(&**child) {
                DockTag::Left => {
                    let width = size.width.min(remaining.width);
                    child.arrange(Rect::new(remaining.left, remaining.top, width, remaining.height));
                    remaining.left += width;
                    remaining.width -= width;
                }
                DockTag::Right => {
                    let width = size.width.min(remaining.width);
                    child.arrange(Rect::new(
                        remaining.right() - width,
                        remaining.top,
                        width,
                        remaining.height,
                    ));
                    remaining.width -= width;
                }
                DockTag::Top => {
                    let height = size.height.min(remaining.height);
                    child.arrange(Rect::new(remaining.left, remaining.top, remaining.width, height));
                    remaining.top += height;
                    remaining.height -= height;
                }
                DockTag::Bottom => {
                    let height = size.height.min(remaining.height);
                    child.arrange(Rect::new(
                        remaining.left,
                        remaining.bottom() - height,
                        remaining.width,
                        height,
                    ));
                    remaining.height -= height;
                }
            }
        }
    }
}
