//! Uniform grid: a fixed number of equally sized cells.

use tracing::debug;
use trellis_core::{Rect, Size};

use crate::contract::Layout;
use crate::host::LayoutAlgorithm;

/// Places children in row-major order into `rows × columns` equal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformGridLayout {
    /// Number of rows; zero is treated as one.
    pub rows: usize,
    /// Number of columns; zero is treated as one.
    pub columns: usize,
    /// Number of blank cells before the first child in the first row.
    pub first_column: usize,
}

impl Default for UniformGridLayout {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl UniformGridLayout {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            first_column: 0,
        }
    }

    /// Leave `first_column` blank cells before the first child.
    pub fn with_first_column(mut self, first_column: usize) -> Self {
        self.first_column = first_column;
        self
    }

    fn cell_counts(&self) -> (usize, usize) {
        (self.rows.max(1), self.columns.max(1))
    }

    fn leading_cells(&self, columns: usize) -> usize {
        if self.first_column >= columns {
            debug!(
                first_column = self.first_column,
                columns, "first column past the last column, clamping"
            );
        }
        self.first_column.min(columns - 1)
    }
}

impl LayoutAlgorithm for UniformGridLayout {
    fn measure_override(&mut self, children: &mut [&mut dyn Layout], available: Size) -> Size {
        let (rows, columns) = self.cell_counts();
        let cell = Size::new(available.width / columns as f64, available.height / rows as f64);

        let largest = children.iter_mut().fold(Size::ZERO, |largest, child| {
            child.measure(cell);
            largest.max(child.desired_size())
        });

        Size::new(
            if available.width.is_infinite() {
                largest.width * columns as f64
            } else {
                available.width
            },
            if available.height.is_infinite() {
                largest.height * rows as f64
            } else {
                available.height
            },
        )
    }

    fn arrange_override(&mut self, children: &mut [&mut dyn Layout], final_size: Size) {
        let (rows, columns) = self.cell_counts();
        let leading = self.leading_cells(columns);
        let width = final_size.width / columns as f64;
        let height = final_size.height / rows as f64;

        for (index, child) in children.iter_mut().enumerate() {
            let cell = index + leading;
            let (row, column) = if cell / columns >= rows {
                (rows - 1, columns - 1)
            } else {
                (cell / columns, cell % columns)
            };
            child.arrange(Rect::new(column as f64 * width, row as f64 * height, width, height));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{as_layouts, Leaf};

    #[test]
    fn test_cells_are_uniform() {
        let mut leaves = vec![Leaf::new(5.0, 5.0), Leaf::new(50.0, 8.0), Leaf::new(1.0, 90.0)];
        let mut grid = UniformGridLayout::new(2, 2);
        let mut children = as_layouts(&mut leaves);
        let desired = grid.measure_override(&mut children, Size::new(100.0, 60.0));
        grid.arrange_override(&mut children, Size::new(100.0, 60.0));
        drop(children);

        assert_eq!(desired, Size::new(100.0, 60.0));
        assert_eq!(leaves[0].rect(), Rect::new(0.0, 0.0, 50.0, 30.0));
        assert_eq!(leaves[1].rect(), Rect::new(50.0, 0.0, 50.0, 30.0));
        assert_eq!(leaves[2].rect(), Rect::new(0.0, 30.0, 50.0, 30.0));
        assert_eq!(leaves[0].measured_with[0], Size::new(50.0, 30.0));
    }

    #[test]
    fn test_unconstrained_desired_is_largest_cell() {
        let mut leaves = vec![Leaf::new(10.0, 5.0), Leaf::new(20.0, 8.0)];
        let mut children = as_layouts(&mut leaves);

        let desired = UniformGridLayout::new(2, 3).measure_override(&mut children, Size::INFINITY);

        assert_eq!(desired, Size::new(60.0, 16.0));
    }

    #[test]
    fn test_first_column_offset() {
        let mut leaves = vec![Leaf::new(5.0, 5.0), Leaf::new(5.0, 5.0)];
        let mut grid = UniformGridLayout::new(2, 3).with_first_column(2);
        let mut children = as_layouts(&mut leaves);
        grid.arrange_override(&mut children, Size::new(90.0, 40.0));
        drop(children);

        assert_eq!(leaves[0].rect(), Rect::new(60.0, 0.0, 30.0, 20.0));
        assert_eq!(leaves[1].rect(), Rect::new(0.0, 20.0, 30.0, 20.0));
    }

    #[test]
    fn test_first_column_is_clamped() {
        let mut leaves = vec![Leaf::new(5.0, 5.0)];
        let mut grid = UniformGridLayout::new(1, 3).with_first_column(7);
        let mut children = as_layouts(&mut leaves);
        grid.arrange_override(&mut children, Size::new(90.0, 30.0));
        drop(children);

        assert_eq!(leaves[0].rect(), Rect::new(60.0, 0.0, 30.0, 30.0));
    }

    #[test]
    fn test_overflow_clamps_into_last_cell() {
        let mut leaves: Vec<Leaf> = (0..6).map(|_| Leaf::new(5.0, 5.0)).collect();
        let mut grid = UniformGridLayout::new(2, 2);
        let mut children = as_layouts(&mut leaves);
        grid.arrange_override(&mut children, Size::new(40.0, 40.0));
        drop(children);

        let last = Rect::new(20.0, 20.0, 20.0, 20.0);
        assert_eq!(leaves[3].rect(), last);
        assert_eq!(leaves[4].rect(), last);
        assert_eq!(leaves[5].rect(), last);
    }

    #[test]
    fn test_zero_counts_act_as_one() {
        let mut leaves = vec![Leaf::new(5.0, 5.0)];
        let mut grid = UniformGridLayout::new(0, 0);
        let mut children = as_layouts(&mut leaves);
        grid.measure_override(&mut children, Size::new(30.0, 30.0));
        grid.arrange_override(&mut children, Size::new(30.0, 30.0));
        drop(children);

        assert_eq!(leaves[0].rect(), Rect::new(0.0, 0.0, 30.0, 30.0));
    }
}
