//! Shared value types.

use std::fmt;

/// Unique identifier for an element in a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Horizontal placement of an element inside the slot its parent arranged it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    /// Align to the left edge
    Left,
    /// Center within the slot
    #[default]
    Center,
    /// Align to the right edge
    Right,
    /// Fill the slot width
    Stretch,
}

/// Vertical placement of an element inside the slot its parent arranged it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAlignment {
    /// Align to the top edge
    Top,
    /// Center within the slot
    #[default]
    Center,
    /// Align to the bottom edge
    Bottom,
    /// Fill the slot height
    Stretch,
}
