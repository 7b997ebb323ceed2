//! Sliding-window enumeration of 3x3 regions
//!
//! The same enumeration backs both the forward and the backward pass, so its
//! indexing contract lives here in one place: for a grid of shape `(H, W)` the
//! iterator visits every top-left corner `(row, col)` with `row` in `[0, H-3]`
//! and `col` in `[0, W-3]`, row outer and column inner, ascending. Grids
//! smaller than 3x3 in either dimension yield nothing.

use crate::grid::Grid;

/// A read-only 3x3 window into a [`Grid`].
///
/// A region aliases its source grid (no copying); `(row, col)` is the window's
/// top-left corner in grid coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Region<'a> {
    grid: &'a Grid,
    row: usize,
    col: usize,
}

impl Region<'_> {
    /// Top-left row of this window in the source grid.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Top-left column of this window in the source grid.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Get the window value at local position `(i, j)`, both in `[0, 3)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is 3 or greater.
    pub fn get(&self, i: usize, j: usize) -> f32 {
        assert!(i < 3 && j < 3, "Region index out of bounds");
        self.grid.get(self.row + i, self.col + j)
    }
}

/// Iterator over every valid 3x3 region of a grid, in row-major order.
///
/// Created by [`Grid::regions`]. Finite and restartable (call
/// [`Grid::regions`] again for a fresh pass).
pub struct Regions<'a> {
    grid: &'a Grid,
    row: usize,
    col: usize,
    // Exclusive bounds: H-2 and W-2, or 0 when the grid is degenerate.
    row_end: usize,
    col_end: usize,
}

impl<'a> Regions<'a> {
    pub(crate) fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            row: 0,
            col: 0,
            row_end: grid.rows().saturating_sub(2),
            col_end: grid.cols().saturating_sub(2),
        }
    }
}

impl<'a> Iterator for Regions<'a> {
    type Item = Region<'a>;

    fn next(&mut self) -> Option<Region<'a>> {
        if self.col_end == 0 || self.row >= self.row_end {
            return None;
        }

        let region = Region {
            grid: self.grid,
            row: self.row,
            col: self.col,
        };

        self.col += 1;
        if self.col == self.col_end {
            self.col = 0;
            self.row += 1;
        }

        Some(region)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.col_end == 0 || self.row >= self.row_end {
            return (0, Some(0));
        }
        let remaining = (self.row_end - self.row) * self.col_end - self.col;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Regions<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_count() {
        let grid = Grid::zeros(5, 7);
        // (5-2) * (7-2) = 15 windows
        assert_eq!(grid.regions().count(), 15);
    }

    #[test]
    fn test_row_major_order() {
        let grid = Grid::zeros(4, 4);
        let corners: Vec<(usize, usize)> =
            grid.regions().map(|r| (r.row(), r.col())).collect();

        assert_eq!(
            corners,
            vec![(0, 0), (0, 1), (1, 0), (1, 1)]
        );
    }

    #[test]
    fn test_region_aliases_grid() {
        let mut grid = Grid::zeros(3, 4);
        grid.set(1, 2, 9.0);

        // Window at (0, 1): grid position (1, 2) is local (1, 1)
        let region = grid.regions().nth(1).unwrap();
        assert_eq!(region.col(), 1);
        assert_eq!(region.get(1, 1), 9.0);
    }

    #[test]
    fn test_degenerate_grids_yield_nothing() {
        assert_eq!(Grid::zeros(2, 10).regions().count(), 0);
        assert_eq!(Grid::zeros(10, 2).regions().count(), 0);
        assert_eq!(Grid::zeros(0, 0).regions().count(), 0);
        assert_eq!(Grid::zeros(2, 2).regions().count(), 0);
    }

    #[test]
    fn test_minimal_grid_single_region() {
        let grid = Grid::zeros(3, 3);
        let corners: Vec<(usize, usize)> =
            grid.regions().map(|r| (r.row(), r.col())).collect();
        assert_eq!(corners, vec![(0, 0)]);
    }

    #[test]
    fn test_restartable() {
        let grid = Grid::zeros(4, 5);
        let first: Vec<(usize, usize)> =
            grid.regions().map(|r| (r.row(), r.col())).collect();
        let second: Vec<(usize, usize)> =
            grid.regions().map(|r| (r.row(), r.col())).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_size_hint_exact() {
        let grid = Grid::zeros(5, 5);
        let mut regions = grid.regions();
        assert_eq!(regions.len(), 9);
        regions.next();
        assert_eq!(regions.len(), 8);
    }

    #[test]
    #[should_panic(expected = "Region index out of bounds")]
    fn test_region_local_index_bounds() {
        let grid = Grid::zeros(3, 3);
        let region = grid.regions().next().unwrap();
        region.get(3, 0);
    }
}
