//! 2-D and 3-D value containers
//!
//! This module provides the `Grid` (2-D input images) and `Volume` (3-D feature
//! map stacks) used by the convolution layer. Both store their data as a flat
//! row-major `Vec<f32>` alongside explicit shape fields.

use serde::{Deserialize, Serialize};

use crate::regions::Regions;

/// A 2-D grid of real values, stored row-major.
///
/// # Example
///
/// ```
/// use conv3x3::Grid;
///
/// let grid = Grid::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// assert_eq!(grid.get(1, 2), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Grid {
    /// Create a grid filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0f32; rows * cols],
        }
    }

    /// Create a grid where every element equals `value`.
    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Create a grid from a flat row-major vector.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "Grid data length must equal rows * cols"
        );
        Self { rows, cols, data }
    }

    /// Get the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.rows && col < self.cols, "Grid index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Set the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(row < self.rows && col < self.cols, "Grid index out of bounds");
        self.data[row * self.cols + col] = value;
    }

    /// Enumerate every valid 3x3 region of this grid under valid padding.
    ///
    /// Regions are yielded in row-major order (row outer, column inner) and
    /// alias this grid rather than copying it. Grids smaller than 3x3 in
    /// either dimension yield no regions. The iteration is restartable by
    /// calling `regions()` again.
    pub fn regions(&self) -> Regions<'_> {
        Regions::new(self)
    }
}

/// A 3-D volume of real values, shaped `(rows, cols, depth)`.
///
/// The depth axis is innermost: the convolution layer writes one value per
/// filter at each output position, so `depth` is the filter index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    rows: usize,
    cols: usize,
    depth: usize,
    data: Vec<f32>,
}

impl Volume {
    /// Create a volume filled with zeros.
    pub fn zeros(rows: usize, cols: usize, depth: usize) -> Self {
        Self {
            rows,
            cols,
            depth,
            data: vec![0.0f32; rows * cols * depth],
        }
    }

    /// Create a volume where every element equals `value`.
    pub fn filled(rows: usize, cols: usize, depth: usize, value: f32) -> Self {
        Self {
            rows,
            cols,
            depth,
            data: vec![value; rows * cols * depth],
        }
    }

    /// Get the shape as a `(rows, cols, depth)` triple.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, self.depth)
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the volume holds no elements (any dimension is zero).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the value at `(row, col, d)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn get(&self, row: usize, col: usize, d: usize) -> f32 {
        assert!(
            row < self.rows && col < self.cols && d < self.depth,
            "Volume index out of bounds"
        );
        self.data[(row * self.cols + col) * self.depth + d]
    }

    /// Set the value at `(row, col, d)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, d: usize, value: f32) {
        assert!(
            row < self.rows && col < self.cols && d < self.depth,
            "Volume index out of bounds"
        );
        self.data[(row * self.cols + col) * self.depth + d] = value;
    }
}
