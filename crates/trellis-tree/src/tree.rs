//! The element tree: ownership, lookup, invalidation and layout passes.
//!
//! Elements own their children directly. The tree keeps an index from
//! element id to the child-index path leading to it from the root, so lookups
//! and ancestor walks never need parent pointers.

use std::collections::HashSet;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{debug, trace};
use trellis_core::{ElementId, OptionsError, Point, Rect, Size, TreeError};
use trellis_layout::Layout;

use crate::dip::PixelRect;
use crate::element::{Element, ElementKind};
use crate::options::LayoutOptions;

/// Child indices from the root down to an element.
type Path = SmallVec<[usize; 8]>;

/// A tree of elements rooted at a window.
#[derive(Debug)]
pub struct ElementTree {
    root: Element,
    options: LayoutOptions,
    /// Every element in the tree, in insertion order
    paths: IndexMap<ElementId, Path>,
    next_id: u64,
    layout_disabled: bool,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::with_valid_options(LayoutOptions::default())
    }
}

impl ElementTree {
    /// Create a tree containing only an empty root window.
    pub fn new(options: LayoutOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self::with_valid_options(options))
    }

    fn with_valid_options(options: LayoutOptions) -> Self {
        let mut root = Element::new(ElementKind::Window);
        root.id = ElementId(0);
        let mut paths = IndexMap::new();
        paths.insert(root.id, Path::new());
        Self {
            root,
            options,
            paths,
            next_id: 1,
            layout_disabled: false,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_id(&self) -> ElementId {
        self.root.id
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Replace the layout options. The next layout pass uses the new viewport.
    pub fn set_options(&mut self, options: LayoutOptions) -> Result<(), OptionsError> {
        options.validate()?;
        self.options = options;
        self.root.dirty = true;
        Ok(())
    }

    /// Number of elements, root included.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Always false: the root cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.paths.contains_key(&id)
    }

    /// Insert `element` and its children as the last child of `parent`.
    ///
    /// Ids are assigned to the whole subtree; the returned id is the one of
    /// `element` itself.
    pub fn insert(&mut self, parent: ElementId, mut element: Element) -> Result<ElementId, TreeError> {
        let path = self.path(parent)?.clone();
        self.assign_ids(&mut element);
        let id = element.id;

        let parent_element = walk_mut(&mut self.root, &path).ok_or(TreeError::UnknownElement { id: parent })?;
        let mut child_path = path;
        child_path.push(parent_element.children.len());
        parent_element.children.push(element);
        if let Some(child) = parent_element.children.last() {
            register(&mut self.paths, child, &mut child_path);
        }
        self.invalidate(parent)?;
        Ok(id)
    }

    /// Detach an element and its subtree, returning it.
    pub fn remove(&mut self, id: ElementId) -> Result<Element, TreeError> {
        let path = self.path(id)?.clone();
        let Some((&index, parent_path)) = path.split_last() else {
            return Err(TreeError::RootRemoval);
        };

        let parent = walk_mut(&mut self.root, parent_path).ok_or(TreeError::UnknownElement { id })?;
        if index >= parent.children.len() {
            return Err(TreeError::UnknownElement { id });
        }
        let parent_id = parent.id;
        let removed = parent.children.remove(index);

        // Drop the removed subtree and shift the later siblings' subtrees up by one.
        let depth = parent_path.len();
        self.paths.retain(|_, other| {
            if other.starts_with(&path) {
                return false;
            }
            if other.len() > depth && other[..depth] == *parent_path && other[depth] > index {
                other[depth] -= 1;
            }
            true
        });
        self.invalidate(parent_id)?;
        Ok(removed)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        let path = self.paths.get(&id)?;
        walk(&self.root, path)
    }

    /// Run `f` on an element and invalidate it afterwards.
    ///
    /// The element keeps its id even if `f` replaces it wholesale. Children
    /// that `f` brought in are given fresh ids and indexed.
    pub fn edit<R>(&mut self, id: ElementId, f: impl FnOnce(&mut Element) -> R) -> Result<R, TreeError> {
        let path = self.path(id)?.clone();
        let element = walk_mut(&mut self.root, &path).ok_or(TreeError::UnknownElement { id })?;
        let before = descendant_ids(element);
        let result = f(&mut *element);
        element.id = id;

        if descendant_ids(element) != before {
            debug!(element = %id, "children replaced during edit, reindexing subtree");
            let known: HashSet<ElementId> = before.into_iter().collect();
            let mut seen = HashSet::new();
            self.paths
                .retain(|_, other| !(other.len() > path.len() && other.starts_with(&path)));

            let mut child_path = path.clone();
            for (index, child) in element.children.iter_mut().enumerate() {
                renumber(child, &known, &mut seen, &mut self.next_id);
                child_path.push(index);
                register(&mut self.paths, child, &mut child_path);
                child_path.pop();
            }
        }

        self.invalidate(id)?;
        Ok(result)
    }

    /// Mark an element and every ancestor as needing layout.
    pub fn invalidate(&mut self, id: ElementId) -> Result<(), TreeError> {
        let path = self.paths.get(&id).ok_or(TreeError::UnknownElement { id })?;
        let mut element = &mut self.root;
        element.dirty = true;
        for &index in path.iter() {
            let Some(child) = element.children.get_mut(index) else {
                return Err(TreeError::UnknownElement { id });
            };
            child.dirty = true;
            element = child;
        }
        Ok(())
    }

    pub fn needs_layout(&self) -> bool {
        self.root.dirty
    }

    /// Measure and arrange the whole tree against the viewport if anything
    /// changed since the last pass.
    pub fn update_layout(&mut self) {
        if self.layout_disabled || !self.root.dirty {
            return;
        }

        let viewport = self.options.viewport();
        trace!(width = viewport.width, height = viewport.height, "layout pass");
        self.root.measure(viewport);
        self.root.arrange(Rect::new(0.0, 0.0, viewport.width, viewport.height));
        self.root.clamp_scroll();
        self.root.update_absolute_bounds(Point::ZERO);
        self.root.clear_dirty();
    }

    /// Set a new viewport and lay the tree out against it.
    pub fn resize(&mut self, size: Size) -> Result<(), OptionsError> {
        let options = self.options.clone().with_viewport(size.width, size.height);
        self.set_options(options)?;
        self.update_layout();
        Ok(())
    }

    /// Suspend layout passes, e.g. while building a large subtree.
    pub fn disable_layout(&mut self) {
        self.layout_disabled = true;
    }

    /// Resume layout passes and run one if the tree is dirty.
    pub fn enable_layout(&mut self) {
        self.layout_disabled = false;
        self.update_layout();
    }

    pub fn is_layout_enabled(&self) -> bool {
        !self.layout_disabled
    }

    /// Find the top-most visible element at a point in root coordinates.
    pub fn hit_test(&self, point: Point) -> Option<ElementId> {
        hit_test_recursive(&self.root, point)
    }

    /// Union of the absolute bounds of every visible element.
    pub fn content_bounds(&self) -> Rect {
        let mut result = self.root.absolute_bounds();
        union_visible(&self.root, &mut result);
        result
    }

    /// First element with the given name, in insertion order.
    pub fn find_by_name(&self, name: &str) -> Option<ElementId> {
        self.paths
            .iter()
            .filter_map(|(&id, path)| Some((id, walk(&self.root, path)?)))
            .find(|(_, element)| element.name.as_deref() == Some(name))
            .map(|(id, _)| id)
    }

    /// Scroll an element's children, returning the clamped position applied.
    pub fn scroll_to(&mut self, id: ElementId, position: Point) -> Result<Point, TreeError> {
        let path = self.paths.get(&id).ok_or(TreeError::UnknownElement { id })?;
        let element = walk_mut(&mut self.root, path).ok_or(TreeError::UnknownElement { id })?;

        let applied = element.apply_scroll(position);
        let own = element.bounds.origin();
        let absolute = element.absolute_bounds.origin();
        element.update_absolute_bounds(Point::new(absolute.x - own.x, absolute.y - own.y));
        Ok(applied)
    }

    /// How far an element's children can scroll on each axis.
    pub fn scroll_limit(&self, id: ElementId) -> Result<Size, TreeError> {
        self.element(id).map(Element::scroll_limit)
    }

    /// An element's absolute bounds in device pixels.
    pub fn pixel_bounds(&self, id: ElementId) -> Result<PixelRect, TreeError> {
        let element = self.element(id)?;
        Ok(self.options.to_pixels(element.absolute_bounds()))
    }

    fn element(&self, id: ElementId) -> Result<&Element, TreeError> {
        self.get(id).ok_or(TreeError::UnknownElement { id })
    }

    fn path(&self, id: ElementId) -> Result<&Path, TreeError> {
        self.paths.get(&id).ok_or(TreeError::UnknownElement { id })
    }

    fn assign_ids(&mut self, element: &mut Element) {
        element.id = ElementId(self.next_id);
        element.dirty = true;
        self.next_id += 1;
        for child in &mut element.children {
            self.assign_ids(child);
        }
    }
}

fn register(paths: &mut IndexMap<ElementId, Path>, element: &Element, path: &mut Path) {
    paths.insert(element.id, path.clone());
    for (index, child) in element.children.iter().enumerate() {
        path.push(index);
        register(paths, child, path);
        path.pop();
    }
}

/// Ids of every element below `element`, depth first.
fn descendant_ids(element: &Element) -> Vec<ElementId> {
    let mut ids = Vec::new();
    let mut pending: Vec<&Element> = element.children.iter().rev().collect();
    while let Some(next) = pending.pop() {
        ids.push(next.id);
        pending.extend(next.children.iter().rev());
    }
    ids
}

/// Give a fresh id to every element whose id is not one of `known`, or
/// repeats one already seen.
fn renumber(element: &mut Element, known: &HashSet<ElementId>, seen: &mut HashSet<ElementId>, next_id: &mut u64) {
    if !known.contains(&element.id) || !seen.insert(element.id) {
        element.id = ElementId(*next_id);
        *next_id += 1;
    }
    element.dirty = true;
    for child in &mut element.children {
        renumber(child, known, seen, next_id);
    }
}

fn walk<'a>(root: &'a Element, path: &[usize]) -> Option<&'a Element> {
    path.iter().try_fold(root, |element, &index| element.children.get(index))
}

fn walk_mut<'a>(root: &'a mut Element, path: &[usize]) -> Option<&'a mut Element> {
    path.iter()
        .try_fold(root, |element, &index| element.children.get_mut(index))
}

fn hit_test_recursive(element: &Element, point: Point) -> Option<ElementId> {
    if !element.visible || !element.absolute_bounds.contains(point) {
        return None;
    }

    // Later children are drawn on top
    element
        .children
        .iter()
        .rev()
        .find_map(|child| hit_test_recursive(child, point))
        .or(Some(element.id))
}

fn union_visible(element: &Element, result: &mut Rect) {
    for child in element.children.iter().filter(|child| child.visible) {
        *result = result.union(&child.absolute_bounds);
        union_visible(child, result);
    }
}
