//! Elements: the participants of an [`ElementTree`](crate::ElementTree).
//!
//! An element adds the container concerns the layout algorithms know nothing
//! about: margins and alignment inside the parent's slot, visibility, a
//! default layout chosen by its kind with an optional custom override, and a
//! scroll offset applied to its children after they are arranged.

use glam::DVec2;
use tracing::debug;
use trellis_core::{ElementId, HorizontalAlignment, Point, Rect, Size, Thickness, VerticalAlignment};
use trellis_layout::{
    CanvasLayout, DockLayout, FillLayout, GridLayout, Layout, LayoutChildren, LayoutHost, StackLayout,
    UniformGridLayout, WrapLayout,
};

/// What an element is, which decides its default layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A control without a layout of its own
    Leaf,
    /// A plain container; children fill it
    Panel,
    /// A top-level container; children fill it
    Window,
    DockPanel,
    StackPanel,
    WrapPanel,
    UniformGrid,
    Grid,
    Canvas,
}

impl ElementKind {
    /// A fresh instance of the layout this kind uses when none is set.
    pub fn default_layout(self) -> Option<LayoutHost> {
        match self {
            ElementKind::Leaf => None,
            ElementKind::Panel | ElementKind::Window => Some(FillLayout.into()),
            ElementKind::DockPanel => Some(DockLayout::default().into()),
            ElementKind::StackPanel => Some(StackLayout::default().into()),
            ElementKind::WrapPanel => Some(WrapLayout::default().into()),
            ElementKind::UniformGrid => Some(UniformGridLayout::default().into()),
            ElementKind::Grid => Some(GridLayout::default().into()),
            ElementKind::Canvas => Some(CanvasLayout.into()),
        }
    }

    pub fn is_container(self) -> bool {
        self != ElementKind::Leaf
    }
}

/// A node of the element tree.
#[derive(Debug)]
pub struct Element {
    pub(crate) id: ElementId,
    kind: ElementKind,
    /// Optional name for lookup and debugging
    pub name: Option<String>,
    /// Preferred size, used when the element is not sized by its content
    pub size: Size,
    pub margin: Thickness,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
    pub visible: bool,
    /// A hidden element with this flag set takes no space in layout.
    pub collapse_when_hidden: bool,
    /// Raw tag read by the parent's layout algorithm
    pub layout_tag: u64,
    /// Ignore the parent's scroll offset
    pub floating: bool,
    /// Size a container to its content; when unset it keeps `size`.
    pub auto_size: bool,
    default_layout: Option<LayoutHost>,
    custom_layout: Option<LayoutHost>,
    pub(crate) arrange_offset: Point,
    desired_size: Size,
    pub(crate) bounds: Rect,
    pub(crate) absolute_bounds: Rect,
    pub(crate) children: Vec<Element>,
    pub(crate) dirty: bool,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        let alignment_stretches = kind.is_container();
        Self {
            id: ElementId(0),
            kind,
            name: None,
            size: Size::ZERO,
            margin: Thickness::default(),
            horizontal_alignment: if alignment_stretches {
                HorizontalAlignment::Stretch
            } else {
                HorizontalAlignment::Center
            },
            vertical_alignment: if alignment_stretches {
                VerticalAlignment::Stretch
            } else {
                VerticalAlignment::Center
            },
            visible: true,
            collapse_when_hidden: true,
            layout_tag: 0,
            floating: false,
            auto_size: true,
            default_layout: kind.default_layout(),
            custom_layout: None,
            arrange_offset: Point::ZERO,
            desired_size: Size::ZERO,
            bounds: Rect::default(),
            absolute_bounds: Rect::default(),
            children: Vec::new(),
            dirty: true,
        }
    }

    /// A leaf control with a preferred size.
    pub fn leaf(width: f64, height: f64) -> Self {
        Self::new(ElementKind::Leaf).with_size(width, height)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn with_margin(mut self, margin: Thickness) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_alignment(mut self, horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    /// Set the tag interpreted by the parent's layout, e.g. a `DockTag` or `GridTag`.
    pub fn with_tag(mut self, tag: impl Into<u64>) -> Self {
        self.layout_tag = tag.into();
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_collapse_when_hidden(mut self, collapse: bool) -> Self {
        self.collapse_when_hidden = collapse;
        self
    }

    pub fn with_floating(mut self, floating: bool) -> Self {
        self.floating = floating;
        self
    }

    pub fn with_auto_size(mut self, auto_size: bool) -> Self {
        self.auto_size = auto_size;
        self
    }

    /// Replace the default layout with `layout`.
    pub fn with_layout(mut self, layout: impl Into<LayoutHost>) -> Self {
        self.custom_layout = Some(layout.into());
        self
    }

    /// Append a child before the element is inserted into a tree.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Size stored by the last measure, margin included.
    pub fn desired_size(&self) -> Size {
        self.desired_size
    }

    /// Arranged rectangle in the parent's client coordinates.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Arranged rectangle relative to the root.
    pub fn absolute_bounds(&self) -> Rect {
        self.absolute_bounds
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Current scroll position; the negation of the offset applied to children.
    pub fn scroll_position(&self) -> Point {
        Point::new(-self.arrange_offset.x, -self.arrange_offset.y)
    }

    /// Whether the parent's layout sees this element.
    pub fn takes_part_in_layout(&self) -> bool {
        self.visible || !self.collapse_when_hidden
    }

    /// The custom layout if one is set, else the kind's default.
    pub fn layout(&self) -> Option<&LayoutHost> {
        self.custom_layout.as_ref().or(self.default_layout.as_ref())
    }

    pub fn layout_mut(&mut self) -> Option<&mut LayoutHost> {
        self.custom_layout.as_mut().or(self.default_layout.as_mut())
    }

    pub fn has_custom_layout(&self) -> bool {
        self.custom_layout.is_some()
    }

    pub fn set_layout(&mut self, layout: impl Into<LayoutHost>) {
        self.custom_layout = Some(layout.into());
    }

    /// Go back to the kind's default layout, returning the custom one.
    pub fn clear_custom_layout(&mut self) -> Option<LayoutHost> {
        self.custom_layout.take()
    }

    pub fn dock_mut(&mut self) -> Option<&mut DockLayout> {
        match self.layout_mut()? {
            LayoutHost::Dock(layout) => Some(layout),
            _ => None,
        }
    }

    pub fn stack_mut(&mut self) -> Option<&mut StackLayout> {
        match self.layout_mut()? {
            LayoutHost::Stack(layout) => Some(layout),
            _ => None,
        }
    }

    pub fn wrap_mut(&mut self) -> Option<&mut WrapLayout> {
        match self.layout_mut()? {
            LayoutHost::Wrap(layout) => Some(layout),
            _ => None,
        }
    }

    pub fn uniform_grid_mut(&mut self) -> Option<&mut UniformGridLayout> {
        match self.layout_mut()? {
            LayoutHost::UniformGrid(layout) => Some(layout),
            _ => None,
        }
    }

    pub fn grid_mut(&mut self) -> Option<&mut GridLayout> {
        match self.layout_mut()? {
            LayoutHost::Grid(layout) => Some(layout),
            _ => None,
        }
    }

    /// How far the children can be scrolled on each axis.
    ///
    /// This is how much the right-most and bottom-most children overhang the
    /// client area, ignoring the current scroll position.
    pub fn scroll_limit(&self) -> Size {
        let (right, bottom) = self
            .children
            .iter()
            .filter(|child| child.takes_part_in_layout() && !child.floating)
            .fold((0.0_f64, 0.0_f64), |(right, bottom), child| {
                (right.max(child.bounds.right()), bottom.max(child.bounds.bottom()))
            });
        Size::new(
            (right - self.arrange_offset.x - self.bounds.width).max(0.0),
            (bottom - self.arrange_offset.y - self.bounds.height).max(0.0),
        )
    }

    /// Scroll to `requested`, clamped into `[0, scroll_limit]`, shifting the
    /// children immediately. Returns the position actually applied.
    pub(crate) fn apply_scroll(&mut self, requested: Point) -> Point {
        let limit = self.scroll_limit();
        let position = Point::from(requested.to_vec2().clamp(DVec2::ZERO, limit.to_vec2()));
        if position != requested {
            debug!(element = %self.id, ?requested, ?position, "scroll position clamped");
        }

        let offset = Point::new(-position.x, -position.y);
        let delta = Point::new(offset.x - self.arrange_offset.x, offset.y - self.arrange_offset.y);
        self.arrange_offset = offset;
        if delta != Point::ZERO {
            for child in self.scrolled_children() {
                child.bounds = child.bounds.offset(delta);
            }
        }
        position
    }

    /// Re-clamp scroll positions below this element after a layout pass.
    pub(crate) fn clamp_scroll(&mut self) {
        if self.arrange_offset != Point::ZERO {
            self.apply_scroll(self.scroll_position());
        }
        for child in &mut self.children {
            child.clamp_scroll();
        }
    }

    pub(crate) fn update_absolute_bounds(&mut self, parent_origin: Point) {
        self.absolute_bounds = self.bounds.offset(parent_origin);
        let origin = self.absolute_bounds.origin();
        for child in &mut self.children {
            child.update_absolute_bounds(origin);
        }
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
        for child in &mut self.children {
            child.clear_dirty();
        }
    }

    fn scrolled_children(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children
            .iter_mut()
            .filter(|child| child.takes_part_in_layout() && !child.floating)
    }

    /// Lay out the children inside this element's own client area.
    fn arrange_content(&mut self) {
        let client = self.bounds.size();
        let Self {
            auto_size,
            default_layout,
            custom_layout,
            children,
            ..
        } = self;

        let mut visible = layout_children(children);
        match custom_layout.as_mut().or(default_layout.as_mut()) {
            Some(host) => {
                if !*auto_size {
                    host.measure_override(&mut visible, client);
                }
                host.arrange_override(&mut visible, client);
            }
            None => {
                for child in visible.iter_mut() {
                    child.measure(Size::INFINITY);
                    let size = child.desired_size();
                    child.arrange(Rect::new(0.0, 0.0, size.width, size.height));
                }
            }
        }
        drop(visible);

        let offset = self.arrange_offset;
        if offset != Point::ZERO {
            for child in self.scrolled_children() {
                child.bounds = child.bounds.offset(offset);
            }
        }
    }
}

fn layout_children(children: &mut [Element]) -> LayoutChildren<'_> {
    children
        .iter_mut()
        .filter(|child| child.takes_part_in_layout())
        .map(|child| child as &mut dyn Layout)
        .collect()
}

/// Position and length of an element on one axis of its slot.
fn align(start: f64, extent: f64, lead: f64, trail: f64, content: f64, placement: Placement) -> (f64, f64) {
    match placement {
        Placement::Start => (start + lead, content),
        Placement::Center => (start + (extent - content - lead - trail) / 2.0 + lead, content),
        Placement::End => (start + extent - content - trail, content),
        Placement::Stretch => (start + lead, extent - lead - trail),
    }
}

#[derive(Debug, Clone, Copy)]
enum Placement {
    Start,
    Center,
    End,
    Stretch,
}

impl From<HorizontalAlignment> for Placement {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left => Placement::Start,
            HorizontalAlignment::Center => Placement::Center,
            HorizontalAlignment::Right => Placement::End,
            HorizontalAlignment::Stretch => Placement::Stretch,
        }
    }
}

impl From<VerticalAlignment> for Placement {
    fn from(alignment: VerticalAlignment) -> Self {
        match alignment {
            VerticalAlignment::Top => Placement::Start,
            VerticalAlignment::Center => Placement::Center,
            VerticalAlignment::Bottom => Placement::End,
            VerticalAlignment::Stretch => Placement::Stretch,
        }
    }
}

impl Layout for Element {
    fn layout_tag(&self) -> u64 {
        self.layout_tag
    }

    fn layout_children(&mut self) -> LayoutChildren<'_> {
        layout_children(&mut self.children)
    }

    fn desired_size(&self) -> Size {
        self.desired_size
    }

    fn set_desired_size(&mut self, size: Size) {
        self.desired_size = size;
    }

    fn measure(&mut self, available: Size) {
        let Self {
            size,
            margin,
            auto_size,
            default_layout,
            custom_layout,
            children,
            desired_size,
            ..
        } = self;

        *desired_size = match custom_layout.as_mut().or(default_layout.as_mut()) {
            Some(host) if *auto_size => {
                let mut visible = layout_children(children);
                margin.grow(host.measure_override(&mut visible, margin.shrink(available)))
            }
            _ => margin.grow(*size),
        };
    }

    fn arrange(&mut self, final_rect: Rect) {
        let margin = self.margin;
        let content = Size::new(
            self.desired_size.width - margin.horizontal(),
            self.desired_size.height - margin.vertical(),
        );

        let (left, width) = align(
            final_rect.left,
            final_rect.width,
            margin.left,
            margin.right,
            content.width,
            self.horizontal_alignment.into(),
        );
        let (top, height) = align(
            final_rect.top,
            final_rect.height,
            margin.top,
            margin.bottom,
            content.height,
            self.vertical_alignment.into(),
        );

        self.bounds = Rect::new(left, top, width, height).clamped();
        if self.kind.is_container() || !self.children.is_empty() {
            self.arrange_content();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_layout::{DockTag, GridTrack};

    fn arranged(mut element: Element, available: Size, slot: Rect) -> Element {
        element.measure(available);
        element.arrange(slot);
        element
    }

    #[test]
    fn test_leaf_desired_includes_margin() {
        let leaf = arranged(
            Element::leaf(40.0, 20.0).with_margin(Thickness::new(1.0, 2.0, 3.0, 4.0)),
            Size::new(10.0, 10.0),
            Rect::new(0.0, 0.0, 100.0, 100.0),
        );
        assert_eq!(leaf.desired_size(), Size::new(44.0, 26.0));
    }

    #[test]
    fn test_alignment_in_slot() {
        let slot = Rect::new(10.0, 10.0, 100.0, 50.0);
        let margin = Thickness::uniform(5.0);

        let centered = arranged(Element::leaf(40.0, 20.0).with_margin(margin), Size::INFINITY, slot);
        assert_eq!(centered.bounds(), Rect::new(40.0, 25.0, 40.0, 20.0));

        let corner = arranged(
            Element::leaf(40.0, 20.0)
                .with_margin(margin)
                .with_alignment(HorizontalAlignment::Right, VerticalAlignment::Top),
            Size::INFINITY,
            slot,
        );
        assert_eq!(corner.bounds(), Rect::new(65.0, 15.0, 40.0, 20.0));

        let stretched = arranged(
            Element::leaf(40.0, 20.0)
                .with_margin(margin)
                .with_alignment(HorizontalAlignment::Stretch, VerticalAlignment::Bottom),
            Size::INFINITY,
            slot,
        );
        assert_eq!(stretched.bounds(), Rect::new(15.0, 35.0, 90.0, 20.0));
    }

    #[test]
    fn test_oversized_slot_clamps_to_zero() {
        let squeezed = arranged(
            Element::leaf(40.0, 20.0)
                .with_margin(Thickness::uniform(10.0))
                .with_alignment(HorizontalAlignment::Stretch, VerticalAlignment::Stretch),
            Size::INFINITY,
            Rect::new(0.0, 0.0, 15.0, 15.0),
        );
        assert_eq!(squeezed.bounds(), Rect::new(10.0, 10.0, 0.0, 0.0));
    }

    #[test]
    fn test_panel_measures_children_inside_margin() {
        let panel = arranged(
            Element::new(ElementKind::StackPanel)
                .with_margin(Thickness::uniform(10.0))
                .with_child(Element::leaf(30.0, 10.0))
                .with_child(Element::leaf(50.0, 20.0)),
            Size::new(200.0, 200.0),
            Rect::new(0.0, 0.0, 200.0, 200.0),
        );

        assert_eq!(panel.desired_size(), Size::new(70.0, 50.0));
        assert_eq!(panel.bounds(), Rect::new(10.0, 10.0, 180.0, 180.0));
        assert_eq!(panel.children()[1].bounds(), Rect::new(65.0, 10.0, 50.0, 20.0));
    }

    #[test]
    fn test_collapsed_and_hidden_children() {
        let panel = arranged(
            Element::new(ElementKind::StackPanel)
                .with_child(Element::leaf(10.0, 10.0).with_visible(false))
                .with_child(
                    Element::leaf(10.0, 15.0)
                        .with_visible(false)
                        .with_collapse_when_hidden(false),
                )
                .with_child(Element::leaf(10.0, 20.0)),
            Size::INFINITY,
            Rect::new(0.0, 0.0, 50.0, 100.0),
        );

        assert_eq!(panel.desired_size(), Size::new(10.0, 35.0));
        assert_eq!(panel.children()[2].bounds().top, 15.0);
    }

    #[test]
    fn test_custom_layout_overrides_default() {
        let mut panel = Element::new(ElementKind::StackPanel)
            .with_layout(DockLayout::default())
            .with_child(Element::leaf(30.0, 10.0).with_tag(DockTag::Top))
            .with_child(Element::leaf(10.0, 10.0));
        assert!(panel.dock_mut().is_some());
        assert!(panel.stack_mut().is_none());

        panel.measure(Size::new(100.0, 100.0));
        panel.arrange(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(panel.children()[1].bounds(), Rect::new(45.0, 50.0, 10.0, 10.0));

        assert!(panel.clear_custom_layout().is_some());
        assert!(panel.stack_mut().is_some());
    }

    #[test]
    fn test_fixed_size_panel_lays_out_children_in_arrange() {
        let mut panel = Element::new(ElementKind::Grid)
            .with_size(60.0, 40.0)
            .with_auto_size(false)
            .with_child(Element::leaf(10.0, 10.0));
        if let Some(grid) = panel.grid_mut() {
            grid.set_columns(vec![GridTrack::fixed(20.0), GridTrack::fill(1.0)]);
        }

        panel.measure(Size::INFINITY);
        assert_eq!(panel.desired_size(), Size::new(60.0, 40.0));
        assert_eq!(panel.children()[0].desired_size(), Size::ZERO);

        panel.arrange(Rect::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(panel.bounds(), Rect::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(panel.children()[0].desired_size(), Size::new(10.0, 10.0));
        assert_eq!(panel.children()[0].bounds(), Rect::new(5.0, 95.0, 10.0, 10.0));
    }

    #[test]
    fn test_scroll_offset_shifts_children() {
        let mut panel = arranged(
            Element::new(ElementKind::StackPanel)
                .with_child(Element::leaf(10.0, 80.0))
                .with_child(Element::leaf(10.0, 80.0))
                .with_child(Element::leaf(10.0, 80.0).with_floating(true)),
            Size::new(50.0, 100.0),
            Rect::new(0.0, 0.0, 50.0, 100.0),
        );
        assert_eq!(panel.scroll_limit(), Size::new(0.0, 60.0));

        let applied = panel.apply_scroll(Point::new(5.0, 100.0));
        assert_eq!(applied, Point::new(0.0, 60.0));
        assert_eq!(panel.children()[0].bounds().top, -60.0);
        assert_eq!(panel.children()[1].bounds().top, 20.0);
        assert_eq!(panel.children()[2].bounds().top, 160.0);

        panel.arrange(Rect::new(0.0, 0.0, 50.0, 100.0));
        assert_eq!(panel.children()[0].bounds().top, -60.0);
        assert_eq!(panel.scroll_limit(), Size::new(0.0, 60.0));
    }

    #[test]
    fn test_default_layouts() {
        assert!(ElementKind::Leaf.default_layout().is_none());
        assert_eq!(
            ElementKind::Window.default_layout().map(|host| host.name()),
            Some("Fill")
        );
        assert_eq!(
            ElementKind::UniformGrid.default_layout().map(|host| host.name()),
            Some("UniformGrid")
        );
        let leaf = Element::leaf(1.0, 1.0);
        assert_eq!(leaf.horizontal_alignment, HorizontalAlignment::Center);
        let panel = Element::new(ElementKind::Panel);
        assert_eq!(panel.vertical_alignment, VerticalAlignment::Stretch);
    }
}
