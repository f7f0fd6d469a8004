//! Plain-text maze rendering for terminals and logs

use super::{Cell, Direction, Maze};

impl Maze {
    /// Render with `+---+` corners, `|` vertical walls and blank passages
    pub fn to_ascii(&self) -> String {
        self.to_ascii_with_marks(&[])
    }

    /// Render, drawing `mark` in the middle of each listed cell
    pub fn to_ascii_with_marks(&self, marks: &[(Cell, char)]) -> String {
        let mut out = String::with_capacity((self.cols() * 4 + 2) * (self.rows() * 2 + 1));

        for row in 0..self.rows() {
            for col in 0..self.cols() {
                out.push('+');
                let open = self.is_open(Cell::new(row, col), Direction::Up);
                out.push_str(if open { "   " } else { "---" });
            }
            out.push_str("+\n");

            out.push('|');
            for col in 0..self.cols() {
                let cell = Cell::new(row, col);
                let mark = marks
                    .iter()
                    .find(|(c, _)| *c == cell)
                    .map_or(' ', |&(_, m)| m);
                out.push(' ');
                out.push(mark);
                out.push(' ');
                out.push(if self.is_open(cell, Direction::Right) { ' ' } else { '|' });
            }
            out.push('\n');
        }

        for _ in 0..self.cols() {
            out.push_str("+---");
        }
        out.push_str("+\n");
        out
    }
}
