//! Minimal 2D physics
//!
//! The game treats physics as a collaborator behind the `PhysicsWorld` trait.
//! `SimWorld` is the built-in implementation:
//! - Fixed timestep only
//! - Axis-aligned rectangles and circles
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod world;

pub use body::{Body, BodyDesc, BodyId, Label, Shape};
pub use collision::{CollisionResult, circle_rect_collision, resolve_velocity};
pub use world::{CONTACT_SLOP, CollisionPair, PhysicsWorld, SimWorld};
