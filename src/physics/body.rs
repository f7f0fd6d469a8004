//! Physics bodies and their descriptions

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable handle to a body; never reused, even across `clear`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// What a body represents in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Ball,
    Goal,
    /// Inner maze wall (released on win)
    Wall,
    /// Outer frame of the play field
    Border,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Ball => "ball",
            Label::Goal => "goal",
            Label::Wall => "wall",
            Label::Border => "border",
        }
    }
}

/// Collision shape, centred on the body position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned rectangle
    Rect { width: f32, height: f32 },
    Circle { radius: f32 },
}

impl Shape {
    /// Half extents of the bounding box
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Rect { width, height } => Vec2::new(width, height) * 0.5,
            Shape::Circle { radius } => Vec2::splat(radius),
        }
    }
}

/// Request to create a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    pub label: Label,
    pub shape: Shape,
    pub pos: Vec2,
    pub is_static: bool,
}

impl BodyDesc {
    /// A static rectangle centred at `(x, y)`
    pub fn rectangle(label: Label, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            label,
            shape: Shape::Rect { width, height },
            pos: Vec2::new(x, y),
            is_static: true,
        }
    }

    /// A dynamic circle centred at `(x, y)`
    pub fn circle(label: Label, x: f32, y: f32, radius: f32) -> Self {
        Self {
            label,
            shape: Shape::Circle { radius },
            pos: Vec2::new(x, y),
            is_static: false,
        }
    }
}

/// A body living in a world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub label: Label,
    pub shape: Shape,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Static bodies never move and ignore gravity
    pub is_static: bool,
}

impl Body {
    pub fn from_desc(id: BodyId, desc: BodyDesc) -> Self {
        Self {
            id,
            label: desc.label,
            shape: desc.shape,
            pos: desc.pos,
            vel: Vec2::ZERO,
            is_static: desc.is_static,
        }
    }

    /// Axis-aligned bounding box as (min, max)
    pub fn aabb(&self) -> (Vec2, Vec2) {
        let half = self.shape.half_extents();
        (self.pos - half, self.pos + half)
    }
}
