//! The physics world contract and a small fixed-step implementation
//!
//! The game only ever talks to `PhysicsWorld`: create bodies, clear them,
//! nudge velocities, flip static flags, change gravity and step. Stepping
//! returns the pairs that started touching during that step, which is how the
//! game learns about collisions.

use std::collections::HashSet;

use glam::Vec2;

use super::body::{Body, BodyDesc, BodyId, Label, Shape};
use super::collision::{aabb_overlap, bodies_collide, resolve_velocity};
use crate::config::GameConfig;
use crate::consts::{AIR_FRICTION, RESTITUTION};

/// Extra distance at which resting bodies still count as touching
pub const CONTACT_SLOP: f32 = 0.5;

/// Two bodies that started touching this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub body_a: BodyId,
    pub label_a: Label,
    pub body_b: BodyId,
    pub label_b: Label,
}

impl CollisionPair {
    /// True if the pair's labels are exactly `{x, y}`, in either order
    pub fn is_between(&self, x: Label, y: Label) -> bool {
        (self.label_a == x && self.label_b == y) || (self.label_a == y && self.label_b == x)
    }
}

/// Request/response contract the game uses to drive a simulation
pub trait PhysicsWorld {
    /// Create a body and add it to the world
    fn add(&mut self, desc: BodyDesc) -> BodyId;

    /// Remove every body
    fn clear(&mut self);

    /// All bodies, in creation order
    fn bodies(&self) -> &[Body];

    fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies().iter().find(|b| b.id == id)
    }

    fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.body(id).map(|b| b.vel)
    }

    /// Returns `false` if the body does not exist
    fn set_velocity(&mut self, id: BodyId, vel: Vec2) -> bool;

    /// Returns `false` if the body does not exist
    fn set_static(&mut self, id: BodyId, is_static: bool) -> bool;

    fn gravity(&self) -> Vec2;

    fn set_gravity(&mut self, gravity: Vec2);

    /// Advance by `dt` seconds, returning the collision-start pairs
    fn step(&mut self, dt: f32) -> Vec<CollisionPair>;
}

/// Built-in world: explicit Euler integration with air drag, dynamic circles
/// pushed out of static bodies, and collision-start tracking.
#[derive(Debug, Clone)]
pub struct SimWorld {
    bodies: Vec<Body>,
    gravity: Vec2,
    /// Fraction of velocity removed every step
    air_friction: f32,
    /// Bounciness of ball contacts (0 = no bounce)
    restitution: f32,
    /// Pairs touching at the end of the previous step, ordered (low, high)
    contacts: HashSet<(BodyId, BodyId)>,
    next_id: u32,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new(AIR_FRICTION, RESTITUTION)
    }
}

impl SimWorld {
    pub fn new(air_friction: f32, restitution: f32) -> Self {
        Self {
            bodies: Vec::new(),
            gravity: Vec2::ZERO,
            air_friction: air_friction.clamp(0.0, 1.0),
            restitution: restitution.clamp(0.0, 1.0),
            contacts: HashSet::new(),
            next_id: 1,
        }
    }

    /// World tuned by the config's drag and bounce
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.air_friction, config.restitution)
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Move every dynamic body by one step
    fn integrate(&mut self, dt: f32) {
        let gravity = self.gravity;
        let damping = 1.0 - self.air_friction;
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.vel += gravity * dt;
            body.vel *= damping;
            body.pos += body.vel * dt;
        }
    }

    /// Push dynamic circles out of static bodies
    fn resolve_contacts(&mut self) {
        for i in 0..self.bodies.len() {
            if self.bodies[i].is_static || !matches!(self.bodies[i].shape, Shape::Circle { .. }) {
                continue;
            }
            for j in 0..self.bodies.len() {
                if i == j || !self.bodies[j].is_static {
                    continue;
                }
                let contact = bodies_collide(&self.bodies[i], &self.bodies[j]);
                if !contact.hit {
                    continue;
                }
                let body = &mut self.bodies[i];
                body.pos += contact.normal * contact.penetration;
                body.vel = resolve_velocity(body.vel, contact.normal, self.restitution);
            }
        }
    }

    /// Whether two bodies touch, allowing `CONTACT_SLOP` for resting contact
    fn touching(a: &Body, b: &Body) -> bool {
        let inflate = |body: &Body| {
            let mut body = body.clone();
            if let Shape::Circle { radius } = body.shape {
                body.shape = Shape::Circle {
                    radius: radius + CONTACT_SLOP,
                };
            }
            body
        };
        let slop = Vec2::splat(CONTACT_SLOP);
        let (amin, amax) = a.aabb();
        let (bmin, bmax) = b.aabb();
        if !aabb_overlap((amin - slop, amax + slop), (bmin - slop, bmax + slop)) {
            return false;
        }
        match (a.shape, b.shape) {
            (Shape::Rect { .. }, Shape::Rect { .. }) => aabb_overlap(a.aabb(), b.aabb()),
            _ => bodies_collide(&inflate(a), &inflate(b)).hit,
        }
    }

    /// Current touching pairs; static-static pairs never count
    fn detect_contacts(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if a.is_static && b.is_static {
                    continue;
                }
                if Self::touching(a, b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

impl PhysicsWorld for SimWorld {
    fn add(&mut self, desc: BodyDesc) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::from_desc(id, desc));
        id
    }

    fn clear(&mut self) {
        log::debug!("Clearing {} bodies", self.bodies.len());
        self.bodies.clear();
        self.contacts.clear();
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    fn set_velocity(&mut self, id: BodyId, vel: Vec2) -> bool {
        match self.body_mut(id) {
            Some(body) => {
                body.vel = vel;
                true
            }
            None => false,
        }
    }

    fn set_static(&mut self, id: BodyId, is_static: bool) -> bool {
        match self.body_mut(id) {
            Some(body) => {
                body.is_static = is_static;
                if is_static {
                    body.vel = Vec2::ZERO;
                }
                true
            }
            None => false,
        }
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn step(&mut self, dt: f32) -> Vec<CollisionPair> {
        self.integrate(dt);
        self.resolve_contacts();

        let mut current = HashSet::new();
        let mut started = Vec::new();
        for (i, j) in self.detect_contacts() {
            let (a, b) = (&self.bodies[i], &self.bodies[j]);
            let key = (a.id.min(b.id), a.id.max(b.id));
            if !self.contacts.contains(&key) {
                log::debug!(
                    "Collision start: {} #{} / {} #{}",
                    a.label.as_str(),
                    a.id.0,
                    b.label.as_str(),
                    b.id.0
                );
                started.push(CollisionPair {
                    body_a: a.id,
                    label_a: a.label,
                    body_b: b.id,
                    label_b: b.label,
                });
            }
            current.insert(key);
        }
        self.contacts = current;
        started
    }
}
