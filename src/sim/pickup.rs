//! Falling collectibles dropped by defeated enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Advances the powerup gauge
    PowerUp,
    /// Raises the player's speed tier
    SpeedItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub body: Body,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn new(kind: PickupKind, pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(PICKUP_SIZE))
                .with_velocity(Vec2::new(0.0, PICKUP_FALL_SPEED)),
            kind,
        }
    }

    pub fn update(&mut self, dt: f32, arena: Vec2) {
        if !self.body.is_active() {
            return;
        }
        self.body.integrate(dt);
        self.body.cull_out_of_bounds(arena, BULLET_BOUNDS_MARGIN);
    }
}
