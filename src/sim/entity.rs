//! Shared body representation for every simulated object
//!
//! A [`Body`] is an axis-aligned box with a velocity and a liveness flag.
//! Liveness is one-way: once deactivated a body stays inactive until the
//! owning container prunes it at the end of the frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::COLLISION_MARGIN;

/// Stable handle for an enemy (homing target lookups, boss escorts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Position (top-left), size and velocity of a simulated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    active: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            active: true,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark for pruning. There is no way back.
    #[inline]
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Advance by velocity
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// True when the top-left corner lies strictly outside the arena grown by `margin`
    pub fn out_of_bounds(&self, arena: Vec2, margin: f32) -> bool {
        self.outside(arena, margin, -margin)
    }

    /// Like [`Body::out_of_bounds`] with the top edge moved to `ceiling`
    pub fn outside(&self, arena: Vec2, margin: f32, ceiling: f32) -> bool {
        self.pos.x < -margin
            || self.pos.y < ceiling
            || self.pos.x > arena.x + margin
            || self.pos.y > arena.y + margin
    }

    /// Deactivate when outside the arena grown by `margin`
    pub fn cull_out_of_bounds(&mut self, arena: Vec2, margin: f32) {
        if self.out_of_bounds(arena, margin) {
            self.deactivate();
        }
    }

    /// Copy of this box grown by `margin` on every side (still active)
    pub fn inflated(&self, margin: f32) -> Body {
        Body::new(
            self.pos - Vec2::splat(margin),
            self.size + Vec2::splat(margin * 2.0),
        )
    }

    /// AABB overlap with the standard inward grace margin
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        aabb_overlap(self, other, COLLISION_MARGIN)
    }
}

/// Axis-aligned overlap test with `margin` shaved off every edge of both boxes
///
/// Boxes whose shrunken extents only touch do not collide.
pub fn aabb_overlap(a: &Body, b: &Body, margin: f32) -> bool {
    a.pos.x + margin < b.pos.x + b.size.x - margin
        && a.pos.x + a.size.x - margin > b.pos.x + margin
        && a.pos.y + margin < b.pos.y + b.size.y - margin
        && a.pos.y + a.size.y - margin > b.pos.y + margin
}
