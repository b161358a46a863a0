//! Absolute positioning.

use tracing::debug;
use trellis_core::{Point, Rect, Size};

use crate::contract::Layout;
use crate::host::LayoutAlgorithm;
use crate::tag::CanvasTag;

/// Places each child at the offset stored in its [`CanvasTag`], at its
/// desired size. The final size given to the canvas has no effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanvasLayout;

/// The child's tag offset; a non-finite component is placed at zero.
fn offset(child: &dyn Layout) -> Point {
    let tag = CanvasTag::from(child.layout_tag());
    let (left, top) = (f64::from(tag.left), f64::from(tag.top));
    if !left.is_finite() || !top.is_finite() {
        debug!(left, top, "canvas offset not finite, clamping to zero");
    }
    let finite_or_zero = |value: f64| if value.is_finite() { value } else { 0.0 };
    Point::new(finite_or_zero(left), finite_or_zero(top))
}

impl LayoutAlgorithm for CanvasLayout {
    fn measure_override(&mut self, children: &mut [&mut dyn Layout], _available: Size) -> Size {
        let mut desired = Size::ZERO;
        for child in children.iter_mut() {
            child.measure(Size::INFINITY);
            let offset = offset(&**child);
            let size = child.desired_size();
            desired = desired.max(Size::new(offset.x + size.width, offset.y + size.height));
        }
        desired
    }

    fn arrange_override(&mut self, children: &mut [&mut dyn Layout], _final_size: Size) {
        for child in children.iter_mut() {
            let offset = offset(&**child);
            let size = child.desired_size();
            child.arrange(Rect::new(offset.x, offset.y, size.width, size.height));
        }
    }
}
