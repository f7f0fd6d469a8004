//! Structural checks: a perfect maze is connected and acyclic

use std::collections::VecDeque;

use super::matrix::BoolMatrix;
use super::{Cell, Maze};
use crate::error::{MazeError, Result};

/// Union-find over `0..len` with path halving and union by size
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl DisjointSet {
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
            components: len,
        }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets holding `a` and `b`; `false` if they were already joined
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        self.components -= 1;
        true
    }

    /// Number of disjoint sets
    pub fn components(&self) -> usize {
        self.components
    }
}

impl Maze {
    #[inline]
    fn cell_index(&self, cell: Cell) -> usize {
        cell.row * self.cols() + cell.col
    }

    /// Check the spanning-tree invariant
    ///
    /// Fails if there are not exactly `cells - 1` passages, or on the first
    /// passage that joins two already-connected cells. With the count right
    /// and no cycle, the cells are necessarily one region.
    pub fn verify(&self) -> Result<()> {
        let expected = self.cell_count().saturating_sub(1);
        let actual = self.passage_count();
        if actual != expected {
            return Err(MazeError::PassageCount { expected, actual });
        }

        let mut sets = DisjointSet::new(self.cell_count());
        for (a, b) in self.passages() {
            if !sets.union(self.cell_index(a), self.cell_index(b)) {
                return Err(MazeError::Cycle { a, b });
            }
        }
        debug_assert_eq!(sets.components(), 1);
        Ok(())
    }

    /// Number of cells reachable from `from` through open passages
    pub fn reachable_from(&self, from: Cell) -> usize {
        if !self.contains(from) {
            return 0;
        }
        let mut seen = BoolMatrix::new(self.rows(), self.cols());
        let mut queue = VecDeque::from([from]);
        seen.set(from.row, from.col, true);
        let mut count = 0;

        while let Some(cell) = queue.pop_front() {
            count += 1;
            for next in self.open_neighbors(cell) {
                if !seen.get(next.row, next.col) {
                    seen.set(next.row, next.col, true);
                    queue.push_back(next);
                }
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Direction;

    #[test]
    fn test_disjoint_set() {
        let mut sets = DisjointSet::new(5);
        assert_eq!(sets.components(), 5);
        assert!(sets.union(0, 1));
        assert!(sets.union(3, 4));
        assert!(sets.union(1, 4));
        assert!(!sets.union(0, 3));
        assert_eq!(sets.components(), 2);
        assert_eq!(sets.find(0), sets.find(4));
        assert_ne!(sets.find(2), sets.find(0));
    }

    #[test]
    fn test_verify_detects_cycle() {
        // 2x3 grid with the right passage count: a ring on the left two
        // columns, while the right column hangs off on its own
        let mut maze = Maze::closed(2, 3, Cell::new(0, 0));
        maze.open(Cell::new(0, 0), Direction::Right);
        maze.open(Cell::new(0, 0), Direction::Down);
        maze.open(Cell::new(1, 1), Direction::Up);
        maze.open(Cell::new(1, 1), Direction::Left);
        maze.open(Cell::new(0, 2), Direction::Down);
        assert_eq!(maze.passage_count(), 5);

        assert!(matches!(maze.verify(), Err(MazeError::Cycle { .. })));
    }

    #[test]
    fn test_verify_reports_too_few_passages() {
        let mut maze = Maze::closed(2, 2, Cell::new(0, 0));
        maze.open(Cell::new(0, 0), Direction::Right);
        maze.open(Cell::new(1, 0), Direction::Right);

        assert!(matches!(
            maze.verify(),
            Err(MazeError::PassageCount {
                expected: 3,
                actual: 2
            })
        ));
        assert_eq!(maze.reachable_from(Cell::new(0, 0)), 2);
    }

    #[test]
    fn test_verify_reports_too_many_passages() {
        // Full ring: one passage too many, reported before any cycle search
        let mut maze = Maze::closed(2, 2, Cell::new(0, 0));
        maze.open(Cell::new(0, 0), Direction::Right);
        maze.open(Cell::new(0, 0), Direction::Down);
        maze.open(Cell::new(1, 1), Direction::Up);
        maze.open(Cell::new(1, 1), Direction::Left);

        assert!(matches!(
            maze.verify(),
            Err(MazeError::PassageCount {
                expected: 3,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_verify_accepts_tree() {
        let mut maze = Maze::closed(2, 2, Cell::new(0, 0));
        maze.open(Cell::new(0, 0), Direction::Right);
        maze.open(Cell::new(0, 1), Direction::Down);
        maze.open(Cell::new(1, 1), Direction::Left);

        assert!(maze.verify().is_ok());
        assert_eq!(maze.reachable_from(Cell::new(1, 0)), 4);
    }

    #[test]
    fn test_reachable_from_outside_grid() {
        let maze = Maze::closed(2, 2, Cell::new(0, 0));
        assert_eq!(maze.reachable_from(Cell::new(5, 5)), 0);
        assert_eq!(maze.reachable_from(Cell::new(1, 1)), 1);
    }
}
