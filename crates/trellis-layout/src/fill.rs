//! Fill layout: every child covers the whole client area.

use trellis_core::{Rect, Size};

use crate::contract::Layout;
use crate::host::LayoutAlgorithm;

/// Default layout of plain panels and windows.
///
/// Children are stacked on top of each other, each one receiving the full
/// final size. The desired size is the largest child on each axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillLayout;

impl LayoutAlgorithm for FillLayout {
    fn measure_override(&mut self, children: &mut [&mut dyn Layout], available: Size) -> Size {
        children.iter_mut().fold(Size::ZERO, |desired, child| {
            child.measure(available);
            desired.max(child.desired_size())
        })
    }

    fn arrange_override(&mut self, children: &mut [&mut dyn Layout], final_size: Size) {
        let slot = Rect::from_origin_size(Default::default(), final_size);
        for child in children.iter_mut() {
            child.arrange(slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{as_layouts, Leaf};

    #[test]
    fn test_fill_desired_is_largest_child() {
        let mut leaves = vec![Leaf::new(40.0, 10.0), Leaf::new(20.0, 30.0)];
        let mut children = as_layouts(&mut leaves);

        let desired = FillLayout.measure_override(&mut children, Size::new(100.0, 100.0));

        assert_eq!(desired, Size::new(40.0, 30.0));
    }

    #[test]
    fn test_fill_passes_available_through() {
        let mut leaves = vec![Leaf::new(40.0, 10.0)];
        let mut children = as_layouts(&mut leaves);
        FillLayout.measure_override(&mut children, Size::new(f64::INFINITY, 70.0));
        drop(children);

        assert_eq!(leaves[0].measured_with.len(), 1);
        assert!(leaves[0].measured_with[0].width.is_infinite());
        assert!((leaves[0].measured_with[0].height - 70.0).abs() < 0.001);
    }

    #[test]
    fn test_fill_arranges_every_child_to_final_size() {
        let mut leaves = vec![Leaf::new(40.0, 10.0), Leaf::new(20.0, 30.0)];
        let mut children = as_layouts(&mut leaves);
        FillLayout.measure_override(&mut children, Size::INFINITY);
        FillLayout.arrange_override(&mut children, Size::new(120.0, 80.0));
        drop(children);

        for leaf in &leaves {
            assert_eq!(leaf.rect(), Rect::new(0.0, 0.0, 120.0, 80.0));
        }
    }

    #[test]
    fn test_fill_without_children() {
        let desired = FillLayout.measure_override(&mut [], Size::new(50.0, 50.0));
        assert_eq!(desired, Size::ZERO);
    }
}
