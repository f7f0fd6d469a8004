//! Row-major boolean matrix used for the visited grid and both wall sets

use serde::{Deserialize, Serialize};

/// A dense `rows x cols` matrix of flags
///
/// Either dimension may be zero (a single-column maze has no vertical walls).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl BoolMatrix {
    /// Create a matrix with every entry `false`
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Read an entry; out-of-range reads are `false`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_some_and(|i| self.cells[i])
    }

    /// Write an entry, returning `false` if the position is out of range
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Number of `true` entries
    pub fn count_true(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }

    /// Iterate `(row, col, value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i / cols, i % cols, v))
    }
}
