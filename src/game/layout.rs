//! Placement of walls, goal and ball in pixel space
//!
//! Screen coordinates: origin top-left, y grows downward. A cell is
//! `unit.x` wide and `unit.y` tall.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::*;
use crate::maze::{Cell, Orientation, WallSlot};

/// Axis-aligned rectangle given by centre and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }
}

/// Pixel geometry of a `rows x cols` maze drawn over `width x height`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub rows: usize,
    pub cols: usize,
}

impl Layout {
    pub fn new(width: f32, height: f32, rows: usize, cols: usize) -> Self {
        Self {
            width,
            height,
            rows,
            cols,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.width,
            config.height,
            config.cells_vertical,
            config.cells_horizontal,
        )
    }

    /// Size of one cell
    #[inline]
    pub fn unit(&self) -> Vec2 {
        Vec2::new(
            self.width / self.cols.max(1) as f32,
            self.height / self.rows.max(1) as f32,
        )
    }

    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        let unit = self.unit();
        Vec2::new(
            cell.col as f32 * unit.x + unit.x / 2.0,
            cell.row as f32 * unit.y + unit.y / 2.0,
        )
    }

    /// Cell containing a point, if it lies on the field
    pub fn cell_at(&self, pos: Vec2) -> Option<Cell> {
        if pos.x < 0.0 || pos.y < 0.0 || pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        let unit = self.unit();
        let cell = Cell::new((pos.y / unit.y) as usize, (pos.x / unit.x) as usize);
        (cell.row < self.rows && cell.col < self.cols).then_some(cell)
    }

    /// Rectangle for an inner wall
    ///
    /// A horizontal slot `(r, c)` sits on the bottom edge of cell `(r, c)`; a
    /// vertical slot sits on its right edge.
    pub fn wall_rect(&self, slot: WallSlot) -> Rect {
        let unit = self.unit();
        let (row, col) = (slot.row as f32, slot.col as f32);
        match slot.orientation {
            Orientation::Horizontal => Rect::new(
                col * unit.x + unit.x / 2.0,
                row * unit.y + unit.y,
                unit.x,
                WALL_THICKNESS,
            ),
            Orientation::Vertical => Rect::new(
                col * unit.x + unit.x,
                row * unit.y + unit.y / 2.0,
                WALL_THICKNESS,
                unit.y,
            ),
        }
    }

    /// Outer frame: top, bottom, left, right
    pub fn borders(&self) -> [Rect; 4] {
        let (w, h) = (self.width, self.height);
        [
            Rect::new(w / 2.0, 0.0, w, BORDER_THICKNESS),
            Rect::new(w / 2.0, h, w, BORDER_THICKNESS),
            Rect::new(0.0, h / 2.0, BORDER_THICKNESS, h),
            Rect::new(w, h / 2.0, BORDER_THICKNESS, h),
        ]
    }

    /// Bottom-right cell
    pub fn goal_cell(&self) -> Cell {
        Cell::new(self.rows.saturating_sub(1), self.cols.saturating_sub(1))
    }

    pub fn goal_rect(&self) -> Rect {
        let unit = self.unit();
        Rect {
            center: Vec2::new(self.width - unit.x / 2.0, self.height - unit.y / 2.0),
            size: unit * GOAL_SCALE,
        }
    }

    /// Ball spawns in the middle of the top-left cell
    pub fn ball_start(&self) -> Vec2 {
        self.cell_center(Cell::new(0, 0))
    }

    pub fn ball_radius(&self) -> f32 {
        let unit = self.unit();
        unit.x.min(unit.y) / BALL_RADIUS_DIVISOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        // 4 columns x 2 rows over 400x200: 100px square cells
        Layout::new(400.0, 200.0, 2, 4)
    }

    #[test]
    fn test_unit_and_centers() {
        let layout = layout();
        assert_eq!(layout.unit(), Vec2::new(100.0, 100.0));
        assert_eq!(layout.cell_center(Cell::new(1, 2)), Vec2::new(250.0, 150.0));
        assert_eq!(layout.ball_start(), Vec2::new(50.0, 50.0));
        assert_eq!(layout.ball_radius(), 25.0);
    }

    #[test]
    fn test_horizontal_wall_position() {
        let rect = layout().wall_rect(WallSlot {
            orientation: Orientation::Horizontal,
            row: 0,
            col: 2,
        });
        assert_eq!(rect.center, Vec2::new(250.0, 100.0));
        assert_eq!(rect.size, Vec2::new(100.0, WALL_THICKNESS));
    }

    #[test]
    fn test_vertical_wall_position() {
        let rect = layout().wall_rect(WallSlot {
            orientation: Orientation::Vertical,
            row: 1,
            col: 0,
        });
        assert_eq!(rect.center, Vec2::new(100.0, 150.0));
        assert_eq!(rect.size, Vec2::new(WALL_THICKNESS, 100.0));
    }

    #[test]
    fn test_goal_in_bottom_right_cell() {
        let layout = layout();
        let goal = layout.goal_rect();
        assert_eq!(goal.center, Vec2::new(350.0, 150.0));
        assert!((goal.size.x - 70.0).abs() < 1e-4);
        assert_eq!(layout.cell_at(goal.center), Some(layout.goal_cell()));
    }

    #[test]
    fn test_borders_frame_the_field() {
        let [top, bottom, left, right] = layout().borders();
        assert_eq!(top.center, Vec2::new(200.0, 0.0));
        assert_eq!(bottom.center, Vec2::new(200.0, 200.0));
        assert_eq!(left.center, Vec2::new(0.0, 100.0));
        assert_eq!(right.center, Vec2::new(400.0, 100.0));
        assert_eq!(left.size, Vec2::new(BORDER_THICKNESS, 200.0));
    }

    #[test]
    fn test_cell_at() {
        let layout = layout();
        assert_eq!(layout.cell_at(Vec2::new(10.0, 10.0)), Some(Cell::new(0, 0)));
        assert_eq!(layout.cell_at(Vec2::new(399.0, 199.0)), Some(Cell::new(1, 3)));
        assert_eq!(layout.cell_at(Vec2::new(400.0, 10.0)), None);
        assert_eq!(layout.cell_at(Vec2::new(-1.0, 10.0)), None);
    }
}
