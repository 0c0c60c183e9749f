//! Dense 2D sampling grids.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a [`Grid`] from untrusted rows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Row `row` has `found` columns where `expected` were required.
    #[error("ragged grid: row {row} has {found} columns, expected {expected}")]
    Ragged {
        /// Offending row index.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        found: usize,
    },
}

/// A row-major `rows x cols` grid of samples.
///
/// Serializes as nested arrays (one inner array per row), the layout
/// plotting front ends expect for surface coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<f64>>", try_from = "Vec<Vec<f64>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Build a grid by evaluating `f(row, col)` at every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Grid filled with `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// One row as a slice, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    /// Iterate over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics, so an empty-column grid yields nothing
        self.data.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Flat row-major values.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Elementwise map.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Elementwise combination of two grids of the same shape.
    ///
    /// # Panics
    ///
    /// Panics if `self` and `other` have different shapes.
    pub fn zip_map(&self, other: &Grid, f: impl Fn(f64, f64) -> f64) -> Self {
        assert_eq!(self.shape(), other.shape(), "zip_map shape mismatch");
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Smallest and largest value, or `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

impl From<Grid> for Vec<Vec<f64>> {
    fn from(grid: Grid) -> Self {
        grid.iter_rows().map(<[f64]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(GridError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }
}

/// `n` evenly spaced samples over the closed interval `[start, end]`.
///
/// `n == 1` yields `[start]`; `n == 0` yields an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            // pin the last sample so the interval is closed exactly
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Broadcast two 1D axes into coordinate grids.
///
/// Returns `(xx, yy)` of shape `(ys.len(), xs.len())` with
/// `xx[r][c] = xs[c]` and `yy[r][c] = ys[r]`.
pub fn meshgrid(xs: &[f64], ys: &[f64]) -> (Grid, Grid) {
    let xx = Grid::from_fn(ys.len(), xs.len(), |_, c| xs[c]);
    let yy = Grid::from_fn(ys.len(), xs.len(), |r, _| ys[r]);
    (xx, yy)
}

/// Outer product: `out[r][c] = a[r] * b[c]`.
pub fn outer(a: &[f64], b: &[f64]) -> Grid {
    Grid::from_fn(a.len(), b.len(), |r, c| a[r] * b[c])
}
