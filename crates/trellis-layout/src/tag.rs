//! Layout tag codecs.
//!
//! Each element owns one opaque `u64` layout tag. Its meaning belongs to the
//! algorithm of the element's parent, never to the element itself. Every
//! algorithm that reads tags defines its own field layout here, as a pair of
//! `From` conversions to and from `u64`.
//!
//! Decoding is total: any bit pattern decodes to some value. Values the
//! owning algorithm cannot use (an unknown dock side, a zero span) are
//! clamped by that algorithm, not rejected here.

/// Absolute offset of a child inside a canvas.
///
/// Layout: `left` as IEEE-754 bits in the low 32 bits, `top` in the high 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasTag {
    pub left: f32,
    pub top: f32,
}

impl CanvasTag {
    pub const fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

impl From<u64> for CanvasTag {
    fn from(raw: u64) -> Self {
        Self {
            left: f32::from_bits(raw as u32),
            top: f32::from_bits((raw >> 32) as u32),
        }
    }
}

impl From<CanvasTag> for u64 {
    fn from(tag: CanvasTag) -> Self {
        u64::from(tag.left.to_bits()) | (u64::from(tag.top.to_bits()) << 32)
    }
}

/// The edge of the remaining area a docked child attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DockTag {
    #[default]
    Left,
    Top,
    Right,
    Bottom,
}

impl DockTag {
    /// Whether `raw` is one of the four encoded sides.
    pub fn is_valid_raw(raw: u64) -> bool {
        raw <= DockTag::Bottom as u64
    }
}

impl From<u64> for DockTag {
    fn from(raw: u64) -> Self {
        match raw {
            1 => DockTag::Top,
            2 => DockTag::Right,
            3 => DockTag::Bottom,
            // Out-of-range values fall back to the default side.
            _ => DockTag::Left,
        }
    }
}

impl From<DockTag> for u64 {
    fn from(tag: DockTag) -> Self {
        tag as u64
    }
}

/// Cell placement of a child inside a grid.
///
/// Layout: `row` in bits 0-15, `column` in 16-31, `row_span` in 32-47 and
/// `column_span` in 48-63. A raw tag of zero decodes to spans of zero, which
/// the grid treats as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridTag {
    pub row: u16,
    pub column: u16,
    pub row_span: u16,
    pub column_span: u16,
}

impl Default for GridTag {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl GridTag {
    /// Place in a single cell.
    pub const fn new(row: u16, column: u16) -> Self {
        Self::spanning(row, column, 1, 1)
    }

    /// Place across `row_span` rows and `column_span` columns.
    pub const fn spanning(row: u16, column: u16, row_span: u16, column_span: u16) -> Self {
        Self {
            row,
            column,
            row_span,
            column_span,
        }
    }
}

impl From<u64> for GridTag {
    fn from(raw: u64) -> Self {
        Self {
            row: raw as u16,
            column: (raw >> 16) as u16,
            row_span: (raw >> 32) as u16,
            column_span: (raw >> 48) as u16,
        }
    }
}

impl From<GridTag> for u64 {
    fn from(tag: GridTag) -> Self {
        u64::from(tag.row)
            | (u64::from(tag.column) << 16)
            | (u64::from(tag.row_span) << 32)
            | (u64::from(tag.column_span) << 48)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grid_tag_layout() {
        let raw = u64::from(GridTag::spanning(1, 2, 3, 4));
        assert_eq!(raw, 0x0004_0003_0002_0001);
        assert_eq!(GridTag::default(), GridTag::spanning(0, 0, 1, 1));
    }

    #[test]
    fn test_zero_tag_decodes_for_every_algorithm() {
        assert_eq!(DockTag::from(0), DockTag::Left);
        assert_eq!(CanvasTag::from(0), CanvasTag::new(0.0, 0.0));
        assert_eq!(GridTag::from(0), GridTag::spanning(0, 0, 0, 0));
    }

    #[test]
    fn test_dock_out_of_range_is_left() {
        assert_eq!(DockTag::from(4), DockTag::Left);
        assert_eq!(DockTag::from(u64::MAX), DockTag::Left);
        assert!(!DockTag::is_valid_raw(4));
        assert!(DockTag::is_valid_raw(3));
    }

    #[test]
    fn test_canvas_tag_halves() {
        let raw = u64::from(CanvasTag::new(1.5, -2.0));
        assert_eq!(raw as u32, 1.5f32.to_bits());
        assert_eq!((raw >> 32) as u32, (-2.0f32).to_bits());
    }

    proptest! {
        #[test]
        fn grid_tag_round_trips(row: u16, column: u16, row_span: u16, column_span: u16) {
            let tag = GridTag::spanning(row, column, row_span, column_span);
            prop_assert_eq!(GridTag::from(u64::from(tag)), tag);
        }

        #[test]
        fn canvas_tag_round_trips_bitwise(left: f32, top: f32) {
            let decoded = CanvasTag::from(u64::from(CanvasTag::new(left, top)));
            prop_assert_eq!(decoded.left.to_bits(), left.to_bits());
            prop_assert_eq!(decoded.top.to_bits(), top.to_bits());
        }

        #[test]
        fn dock_tag_round_trips(raw in 0u64..4) {
            let tag = DockTag::from(raw);
            prop_assert_eq!(u64::from(tag), raw);
            prop_assert_eq!(DockTag::from(u64::from(tag)), tag);
        }

        #[test]
        fn raw_tags_re_encode_identically(raw: u64) {
            prop_assert_eq!(u64::from(GridTag::from(raw)), raw);
            prop_assert_eq!(u64::from(CanvasTag::from(raw)), raw);
        }
    }
}
