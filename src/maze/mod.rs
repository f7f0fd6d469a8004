//! Perfect maze model and generation
//!
//! A maze over a `rows x cols` grid is stored as two wall matrices:
//! - `vertical_open[r][c]`: passage between `(r, c)` and `(r, c + 1)`
//! - `horizontal_open[r][c]`: passage between `(r, c)` and `(r + 1, c)`
//!
//! A generated maze is always a spanning tree of the grid graph.

pub mod ascii;
pub mod generator;
pub mod matrix;
pub mod shuffle;
pub mod verify;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use generator::generate;
pub use matrix::BoolMatrix;
pub use shuffle::shuffle;
pub use verify::DisjointSet;

/// One grid unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction from a cell to one of its grid neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Neighbor candidates in the order they are listed before shuffling
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

/// Which wall matrix a slot lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Between `(r, c)` and `(r, c + 1)`
    Vertical,
    /// Between `(r, c)` and `(r + 1, c)`
    Horizontal,
}

/// Address of one inner wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSlot {
    pub orientation: Orientation,
    pub row: usize,
    pub col: usize,
}

/// A maze layout: grid size, start cell and the two wall matrices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    rows: usize,
    cols: usize,
    start: Cell,
    vertical_open: BoolMatrix,
    horizontal_open: BoolMatrix,
}

impl Maze {
    /// A maze with every wall present
    pub(crate) fn closed(rows: usize, cols: usize, start: Cell) -> Self {
        Self {
            rows,
            cols,
            start,
            vertical_open: BoolMatrix::new(rows, cols.saturating_sub(1)),
            horizontal_open: BoolMatrix::new(rows.saturating_sub(1), cols),
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

    /// Cell the generating traversal started from
    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// `rows x (cols - 1)` matrix of removed vertical walls
    pub fn vertical_open(&self) -> &BoolMatrix {
        &self.vertical_open
    }

    /// `(rows - 1) x cols` matrix of removed horizontal walls
    pub fn horizontal_open(&self) -> &BoolMatrix {
        &self.horizontal_open
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Grid neighbor of `cell` in `dir`, or `None` past the edge
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let Cell { row, col } = cell;
        let next = match dir {
            Direction::Up => Cell::new(row.checked_sub(1)?, col),
            Direction::Right => Cell::new(row, col + 1),
            Direction::Down => Cell::new(row + 1, col),
            Direction::Left => Cell::new(row, col.checked_sub(1)?),
        };
        self.contains(next).then_some(next)
    }

    /// Wall separating `cell` from its neighbor in `dir`
    pub fn wall_slot(&self, cell: Cell, dir: Direction) -> Option<WallSlot> {
        if !self.contains(cell) {
            return None;
        }
        self.neighbor(cell, dir)?;
        let Cell { row, col } = cell;
        let slot = match dir {
            Direction::Left => (Orientation::Vertical, row, col - 1),
            Direction::Right => (Orientation::Vertical, row, col),
            Direction::Up => (Orientation::Horizontal, row - 1, col),
            Direction::Down => (Orientation::Horizontal, row, col),
        };
        Some(WallSlot {
            orientation: slot.0,
            row: slot.1,
            col: slot.2,
        })
    }

    fn matrix(&self, orientation: Orientation) -> &BoolMatrix {
        match orientation {
            Orientation::Vertical => &self.vertical_open,
            Orientation::Horizontal => &self.horizontal_open,
        }
    }

    /// Whether a passage leads from `cell` in `dir` (always false at the edge)
    pub fn is_open(&self, cell: Cell, dir: Direction) -> bool {
        self.wall_slot(cell, dir)
            .is_some_and(|s| self.matrix(s.orientation).get(s.row, s.col))
    }

    /// Remove the wall between `cell` and its neighbor in `dir`
    pub(crate) fn open(&mut self, cell: Cell, dir: Direction) -> bool {
        let Some(slot) = self.wall_slot(cell, dir) else {
            return false;
        };
        match slot.orientation {
            Orientation::Vertical => self.vertical_open.set(slot.row, slot.col, true),
            Orientation::Horizontal => self.horizontal_open.set(slot.row, slot.col, true),
        }
    }

    /// Cells reachable from `cell` in one step
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&d| self.is_open(cell, d))
            .filter_map(move |d| self.neighbor(cell, d))
    }

    /// Number of removed walls
    pub fn passage_count(&self) -> usize {
        self.vertical_open.count_true() + self.horizontal_open.count_true()
    }

    /// Every passage as the pair of cells it joins
    pub fn passages(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        let vertical = self
            .vertical_open
            .iter()
            .filter(|&(_, _, open)| open)
            .map(|(r, c, _)| (Cell::new(r, c), Cell::new(r, c + 1)));
        let horizontal = self
            .horizontal_open
            .iter()
            .filter(|&(_, _, open)| open)
            .map(|(r, c, _)| (Cell::new(r, c), Cell::new(r + 1, c)));
        vertical.chain(horizontal)
    }

    /// Walls still standing, horizontal slots first
    pub fn closed_walls(&self) -> impl Iterator<Item = WallSlot> + '_ {
        let horizontal = self
            .horizontal_open
            .iter()
            .filter(|&(_, _, open)| !open)
            .map(|(row, col, _)| WallSlot {
                orientation: Orientation::Horizontal,
                row,
                col,
            });
        let vertical = self
            .vertical_open
            .iter()
            .filter(|&(_, _, open)| !open)
            .map(|(row, col, _)| WallSlot {
                orientation: Orientation::Vertical,
                row,
                col,
            });
        horizontal.chain(vertical)
    }
}
