//! Keyboard controls
//!
//! Each press nudges the ball's velocity by a fixed step; holding a key relies
//! on key repeat.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the four steering inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Up,
    Right,
    Down,
    Left,
}

impl Control {
    /// Map a DOM `keyCode` (W/D/S/A, plus arrow keys)
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            87 | 38 => Some(Control::Up),
            68 | 39 => Some(Control::Right),
            83 | 40 => Some(Control::Down),
            65 | 37 => Some(Control::Left),
            _ => None,
        }
    }

    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "W" | "ArrowUp" => Some(Control::Up),
            "d" | "D" | "ArrowRight" => Some(Control::Right),
            "s" | "S" | "ArrowDown" => Some(Control::Down),
            "a" | "A" | "ArrowLeft" => Some(Control::Left),
            _ => None,
        }
    }

    /// Velocity after one press (screen space, y down)
    pub fn apply(self, vel: Vec2, step: f32) -> Vec2 {
        match self {
            Control::Up => Vec2::new(vel.x, vel.y - step),
            Control::Right => Vec2::new(vel.x + step, vel.y),
            Control::Down => Vec2::new(vel.x, vel.y + step),
            Control::Left => Vec2::new(vel.x - step, vel.y),
        }
    }
}
