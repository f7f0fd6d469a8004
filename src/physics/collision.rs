//! Contact tests between circles and axis-aligned rectangles
//!
//! Only the ball is round; everything else in a maze is a box. Contacts carry a
//! normal pointing from the obstacle towards the moving body so callers can
//! push it back out along the normal.

use glam::Vec2;

use super::body::{Body, Shape};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the shapes overlap
    pub hit: bool,
    /// Contact point on the obstacle surface
    pub point: Vec2,
    /// Unit normal pointing from the obstacle towards the first shape
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a circle against an axis-aligned rectangle
///
/// `rect_half` is the rectangle's half width and half height.
pub fn circle_rect_collision(
    center: Vec2,
    radius: f32,
    rect_center: Vec2,
    rect_half: Vec2,
) -> CollisionResult {
    let local = center - rect_center;
    let clamped = local.clamp(-rect_half, rect_half);

    if clamped != local {
        // Centre outside the box: nearest point on the boundary
        let delta = local - clamped;
        let dist = delta.length();
        if dist >= radius {
            return CollisionResult::miss();
        }
        return CollisionResult {
            hit: true,
            point: rect_center + clamped,
            normal: delta / dist,
            penetration: radius - dist,
        };
    }

    // Centre inside the box (tunnelled): leave through the closest face
    let gap = rect_half - local.abs();
    let (normal, point, depth) = if gap.x < gap.y {
        let sign = if local.x < 0.0 { -1.0 } else { 1.0 };
        (
            Vec2::new(sign, 0.0),
            rect_center + Vec2::new(sign * rect_half.x, local.y),
            gap.x,
        )
    } else {
        let sign = if local.y < 0.0 { -1.0 } else { 1.0 };
        (
            Vec2::new(0.0, sign),
            rect_center + Vec2::new(local.x, sign * rect_half.y),
            gap.y,
        )
    };
    CollisionResult {
        hit: true,
        point,
        normal,
        penetration: depth + radius,
    }
}

/// Check two circles; normal points from `b` towards `a`
pub fn circle_circle_collision(a: Vec2, ra: f32, b: Vec2, rb: f32) -> CollisionResult {
    let delta = a - b;
    let dist = delta.length();
    if dist >= ra + rb {
        return CollisionResult::miss();
    }
    let normal = if dist > f32::EPSILON { delta / dist } else { Vec2::Y };
    CollisionResult {
        hit: true,
        point: b + normal * rb,
        normal,
        penetration: ra + rb - dist,
    }
}

/// Strict overlap of two axis-aligned boxes given as (min, max)
pub fn aabb_overlap(a: (Vec2, Vec2), b: (Vec2, Vec2)) -> bool {
    a.0.x < b.1.x && a.1.x > b.0.x && a.0.y < b.1.y && a.1.y > b.0.y
}

/// Contact between `a` and `b`, with the normal pointing towards `a`
pub fn bodies_collide(a: &Body, b: &Body) -> CollisionResult {
    match (a.shape, b.shape) {
        (Shape::Circle { radius }, Shape::Rect { .. }) => {
            circle_rect_collision(a.pos, radius, b.pos, b.shape.half_extents())
        }
        (Shape::Rect { .. }, Shape::Circle { radius }) => {
            let mut result = circle_rect_collision(b.pos, radius, a.pos, a.shape.half_extents());
            result.normal = -result.normal;
            result
        }
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle_collision(a.pos, ra, b.pos, rb)
        }
        (Shape::Rect { .. }, Shape::Rect { .. }) => {
            if aabb_overlap(a.aabb(), b.aabb()) {
                let delta = a.pos - b.pos;
                CollisionResult {
                    hit: true,
                    point: (a.pos + b.pos) * 0.5,
                    normal: delta.normalize_or(Vec2::Y),
                    penetration: 0.0,
                }
            } else {
                CollisionResult::miss()
            }
        }
    }
}

/// Remove the velocity component driving into a surface
///
/// `restitution` 0 stops the body dead along the normal, 1 bounces it back
/// with full speed. Velocity already leaving the surface is left alone.
#[inline]
pub fn resolve_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let into = velocity.dot(normal);
    if into >= 0.0 {
        return velocity;
    }
    velocity - (1.0 + restitution) * into * normal
}
