//! Minimal participants for exercising the algorithms in unit tests.

use trellis_core::{Rect, Size};

use crate::contract::{Layout, LayoutChildren};

/// A leaf with a fixed natural size that records every call it receives.
#[derive(Debug, Clone, Default)]
pub struct Leaf {
    pub tag: u64,
    pub natural: Size,
    pub desired: Size,
    pub arranged: Option<Rect>,
    pub measured_with: Vec<Size>,
    pub collapsed: bool,
}

impl Leaf {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            natural: Size::new(width, height),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: u64) -> Self {
        self.tag = tag;
        self
    }

    pub fn collapsed(mut self) -> Self {
        self.collapsed = true;
        self
    }

    pub fn rect(&self) -> Rect {
        self.arranged.unwrap_or_default()
    }
}

impl Layout for Leaf {
    fn layout_tag(&self) -> u64 {
        self.tag
    }

    fn layout_children(&mut self) -> LayoutChildren<'_> {
        LayoutChildren::new()
    }

    fn desired_size(&self) -> Size {
        self.desired
    }

    fn set_desired_size(&mut self, size: Size) {
        self.desired = size;
    }

    fn measure(&mut self, available: Size) {
        self.measured_with.push(available);
        self.desired = self.natural;
    }

    fn arrange(&mut self, final_rect: Rect) {
        self.arranged = Some(final_rect.clamped());
    }
}

/// An owner holding leaves, skipping the collapsed ones.
#[derive(Debug, Default)]
pub struct Panel {
    pub children: Vec<Leaf>,
    pub desired: Size,
}

impl Panel {
    pub fn new(children: Vec<Leaf>) -> Self {
        Self {
            children,
            desired: Size::ZERO,
        }
    }
}

impl Layout for Panel {
    fn layout_tag(&self) -> u64 {
        0
    }

    fn layout_children(&mut self) -> LayoutChildren<'_> {
        self.children
            .iter_mut()
            .filter(|child| !child.collapsed)
            .map(|child| child as &mut dyn Layout)
            .collect()
    }

    fn desired_size(&self) -> Size {
        self.desired
    }

    fn set_desired_size(&mut self, size: Size) {
        self.desired = size;
    }

    fn measure(&mut self, _available: Size) {}

    fn arrange(&mut self, _final_rect: Rect) {}
}

/// Borrow every leaf as a layout participant.
pub fn as_layouts(leaves: &mut [Leaf]) -> Vec<&mut dyn Layout> {
    leaves.iter_mut().map(|leaf| leaf as &mut dyn Layout).collect()
}
