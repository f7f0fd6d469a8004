//! Randomized depth-first maze generation
//!
//! Visits the grid depth-first from a start cell. On entering a cell the four
//! neighbor directions are shuffled; each unvisited in-bounds neighbor gets the
//! wall towards it removed and is fully explored before the next direction is
//! tried. Opening walls only into unvisited cells makes the result a spanning
//! tree.
//!
//! The traversal keeps its own stack instead of recursing, so grid size is not
//! limited by the call stack. Shuffles happen in the same order a recursive
//! walk would perform them, so a seeded RNG yields the same maze either way.

use rand::Rng;

use super::matrix::BoolMatrix;
use super::shuffle::shuffle;
use super::{Cell, Direction, Maze};
use crate::error::{MazeError, Result};

/// One cell on the traversal stack with the directions still to try
#[derive(Debug)]
struct Frame {
    cell: Cell,
    candidates: [Direction; 4],
    next: usize,
}

/// Generate a perfect maze over a `rows x cols` grid starting from `start`
pub fn generate<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    start: Cell,
    rng: &mut R,
) -> Result<Maze> {
    if rows == 0 || cols == 0 {
        return Err(MazeError::EmptyGrid { rows, cols });
    }
    if start.row >= rows || start.col >= cols {
        return Err(MazeError::StartOutOfBounds { start, rows, cols });
    }

    let mut maze = Maze::closed(rows, cols, start);
    let mut visited = BoolMatrix::new(rows, cols);
    let mut stack: Vec<Frame> = Vec::with_capacity(rows * cols);
    let mut max_depth = 0;

    enter(&mut visited, &mut stack, start, rng);

    while let Some(frame) = stack.last_mut() {
        let Some(&dir) = frame.candidates.get(frame.next) else {
            // All four directions tried: backtrack
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;

        let Some(next) = maze.neighbor(cell, dir) else {
            continue;
        };
        if visited.get(next.row, next.col) {
            continue;
        }

        maze.open(cell, dir);
        enter(&mut visited, &mut stack, next, rng);
        max_depth = max_depth.max(stack.len());
    }

    log::debug!(
        "Generated {}x{} maze from {}: {} passages, max depth {}",
        rows,
        cols,
        start,
        maze.passage_count(),
        max_depth
    );

    Ok(maze)
}

/// Generate a perfect maze from a uniformly random start cell
pub fn generate_from_random_start<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Maze> {
    if rows == 0 || cols == 0 {
        return Err(MazeError::EmptyGrid { rows, cols });
    }
    let start = Cell::new(rng.random_range(0..rows), rng.random_range(0..cols));
    generate(rows, cols, start, rng)
}

/// Mark `cell` visited and push it with a freshly shuffled direction list
fn enter<R: Rng + ?Sized>(
    visited: &mut BoolMatrix,
    stack: &mut Vec<Frame>,
    cell: Cell,
    rng: &mut R,
) {
    if visited.get(cell.row, cell.col) {
        return;
    }
    visited.set(cell.row, cell.col, true);

    let mut candidates = Direction::ALL;
    shuffle(&mut candidates, rng);
    stack.push(Frame {
        cell,
        candidates,
        next: 0,
    });
}
