//! The layout host: the single entry point containers use to run a layout.

use std::fmt;

use tracing::{trace, trace_span, Span};
use trellis_core::{Rect, Size};

use crate::canvas::CanvasLayout;
use crate::contract::Layout;
use crate::dock::DockLayout;
use crate::fill::FillLayout;
use crate::grid::GridLayout;
use crate::stack::StackLayout;
use crate::uniform_grid::UniformGridLayout;
use crate::wrap::WrapLayout;

/// The two steps every layout algorithm implements.
///
/// Both steps receive the visible children already filtered, in order. The
/// arrange step places children in the owner's client coordinates, starting
/// at `(0, 0)`.
pub trait LayoutAlgorithm: fmt::Debug {
    /// Measure the children and return the owner's desired content size.
    fn measure_override(&mut self, children: &mut [&mut dyn Layout], available: Size) -> Size;

    /// Arrange every child inside `final_size`.
    fn arrange_override(&mut self, children: &mut [&mut dyn Layout], final_size: Size);
}

/// A layout algorithm owned by exactly one container.
#[derive(Debug)]
pub enum LayoutHost {
    Fill(FillLayout),
    Dock(DockLayout),
    Stack(StackLayout),
    Wrap(WrapLayout),
    UniformGrid(UniformGridLayout),
    Grid(GridLayout),
    Canvas(CanvasLayout),
    /// An algorithm defined outside this crate.
    Custom(Box<dyn LayoutAlgorithm>),
}

impl LayoutHost {
    /// Wrap a user-defined algorithm.
    pub fn custom(algorithm: impl LayoutAlgorithm + 'static) -> Self {
        Self::Custom(Box::new(algorithm))
    }

    /// Measure `owner`'s visible children and store the result as its desired size.
    pub fn measure(&mut self, owner: &mut dyn Layout, available: Size) {
        let desired = {
            let mut children = owner.layout_children();
            self.measure_override(&mut children, available)
        };
        owner.set_desired_size(desired);
    }

    /// Arrange `owner`'s visible children inside `final_rect`.
    ///
    /// Only the size of `final_rect` matters: children are placed relative to
    /// the owner's own client area.
    pub fn arrange(&mut self, owner: &mut dyn Layout, final_rect: Rect) {
        let mut children = owner.layout_children();
        self.arrange_override(&mut children, final_rect.size());
    }

    /// Run the algorithm's measure step over an explicit child list.
    pub fn measure_override(&mut self, children: &mut [&mut dyn Layout], available: Size) -> Size {
        let _span = self.make_trace_span().entered();
        let desired = match self {
            Self::Fill(layout) => layout.measure_override(children, available),
            Self::Dock(layout) => layout.measure_override(children, available),
            Self::Stack(layout) => layout.measure_override(children, available),
            Self::Wrap(layout) => layout.measure_override(children, available),
            Self::UniformGrid(layout) => layout.measure_override(children, available),
            Self::Grid(layout) => layout.measure_override(children, available),
            Self::Canvas(layout) => layout.measure_override(children, available),
            Self::Custom(layout) => layout.measure_override(children, available),
        };
        trace!(
            children = children.len(),
            available = ?available,
            desired = ?desired,
            "measured"
        );
        desired
    }

    /// Run the algorithm's arrange step over an explicit child list.
    pub fn arrange_override(&mut self, children: &mut [&mut dyn Layout], final_size: Size) {
        let _span = self.make_trace_span().entered();
        trace!(children = children.len(), final_size = ?final_size, "arranging");
        match self {
            Self::Fill(layout) => layout.arrange_override(children, final_size),
            Self::Dock(layout) => layout.arrange_override(children, final_size),
            Self::Stack(layout) => layout.arrange_override(children, final_size),
            Self::Wrap(layout) => layout.arrange_override(children, final_size),
            Self::UniformGrid(layout) => layout.arrange_override(children, final_size),
            Self::Grid(layout) => layout.arrange_override(children, final_size),
            Self::Canvas(layout) => layout.arrange_override(children, final_size),
            Self::Custom(layout) => layout.arrange_override(children, final_size),
        }
    }

    /// Name of the wrapped algorithm, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fill(_) => "Fill",
            Self::Dock(_) => "Dock",
            Self::Stack(_) => "Stack",
            Self::Wrap(_) => "Wrap",
            Self::UniformGrid(_) => "UniformGrid",
            Self::Grid(_) => "Grid",
            Self::Canvas(_) => "Canvas",
            Self::Custom(_) => "Custom",
        }
    }

    fn make_trace_span(&self) -> Span {
        match self {
            Self::Fill(_) => trace_span!("Fill"),
            Self::Dock(_) => trace_span!("Dock"),
            Self::Stack(layout) => trace_span!("Stack", orientation = ?layout.orientation),
            Self::Wrap(layout) => trace_span!("Wrap", orientation = ?layout.orientation),
            Self::UniformGrid(_) => trace_span!("UniformGrid"),
            Self::Grid(_) => trace_span!("Grid"),
            Self::Canvas(_) => trace_span!("Canvas"),
            Self::Custom(_) => trace_span!("Custom"),
        }
    }
}

impl From<FillLayout> for LayoutHost {
    fn from(layout: FillLayout) -> Self {
        Self::Fill(layout)
    }
}

impl From<DockLayout> for LayoutHost {
    fn from(layout: DockLayout) -> Self {
        Self::Dock(layout)
    }
}

impl From<StackLayout> for LayoutHost {
    fn from(layout: StackLayout) -> Self {
        Self::Stack(layout)
    }
}

impl From<WrapLayout> for LayoutHost {
    fn from(layout: WrapLayout) -> Self {
        Self::Wrap(layout)
    }
}

impl From<UniformGridLayout> for LayoutHost {
    fn from(layout: UniformGridLayout) -> Self {
        Self::UniformGrid(layout)
    }
}

impl From<GridLayout> for LayoutHost {
    fn from(layout: GridLayout) -> Self {
        Self::Grid(layout)
    }
}

impl From<CanvasLayout> for LayoutHost {
    fn from(layout: CanvasLayout) -> Self {
        Self::Canvas(layout)
    }
}
