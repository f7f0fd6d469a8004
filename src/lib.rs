//! Maze Ball - roll a ball through a random perfect maze
//!
//! Core modules:
//! - `maze`: Perfect-maze generation (randomized depth-first traversal)
//! - `physics`: Minimal 2D physics world (bodies, contacts, collision-start events)
//! - `game`: Session adapter turning a maze into walls, ball, goal and win detection
//! - `config`: Data-driven game configuration

pub mod config;
pub mod error;
pub mod game;
pub mod maze;
pub mod physics;

pub use config::GameConfig;
pub use error::{MazeError, Result};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the browser frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default grid size (columns x rows)
    pub const CELLS_HORIZONTAL: usize = 20;
    pub const CELLS_VERTICAL: usize = 16;

    /// Default play field size in pixels
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 640.0;

    /// Thickness of an inner maze wall
    pub const WALL_THICKNESS: f32 = 5.0;
    /// Thickness of the outer frame
    pub const BORDER_THICKNESS: f32 = 10.0;

    /// Goal edge length as a fraction of the cell size
    pub const GOAL_SCALE: f32 = 0.7;
    /// Ball radius is min(cell width, cell height) / this
    pub const BALL_RADIUS_DIVISOR: f32 = 4.0;

    /// Velocity change per key press (px/s, one pixel per tick)
    pub const VELOCITY_STEP: f32 = 60.0;
    /// Downward gravity switched on when the player wins (px/s²)
    pub const WIN_GRAVITY: f32 = 1000.0;
    /// Fraction of velocity lost to air drag each step
    pub const AIR_FRICTION: f32 = 0.01;

    /// Wall bounce; 0 leaves the ball resting against the wall
    pub const RESTITUTION: f32 = 0.0;
}

/// Draw a fresh seed from the thread-local entropy source
#[inline]
pub fn entropy_seed() -> u64 {
    rand::rng().random()
}
