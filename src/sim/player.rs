//! The player ship and its orbiting Bits

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::entity::Body;
use super::weapon::{PowerupSlot, WeaponState};
use crate::consts::*;

/// Satellite that orbits the player, blocks bullets and mirrors the main gun
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bit {
    pub body: Body,
    /// Shared orbit angle; each Bit adds its own slot offset
    pub angle: f32,
}

impl Bit {
    fn new(at: Vec2) -> Self {
        Self {
            body: Body::new(at - Vec2::splat(BIT_SIZE / 2.0), Vec2::splat(BIT_SIZE)),
            angle: 0.0,
        }
    }

    /// Ease toward orbit slot `index` of `total` around `anchor`
    fn update(&mut self, dt: f32, anchor: Vec2, index: usize, total: usize) {
        self.angle += BIT_ORBIT_SPEED * dt;
        let offset = self.angle + TAU * index as f32 / total as f32;
        let target = anchor - Vec2::splat(BIT_SIZE / 2.0)
            + Vec2::new(offset.cos(), offset.sin()) * BIT_ORBIT_RADIUS;
        self.body.pos += (target - self.body.pos) * (BIT_FOLLOW * dt).min(1.0);
    }
}

/// Directional intent for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Steering {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Touch drag delta applied directly
    pub drag: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub weapon: WeaponState,
    /// 0..=3, each tier adds movement speed
    pub speed_tier: u8,
    pub shot_timer: f32,
    pub sub_shot_timer: f32,
    /// Barrier charges, one per absorbed hit
    pub shield: u32,
    /// Seconds of post-respawn invincibility left
    pub invincibility: f32,
    pub bombs: u32,
    pub bits: Vec<Bit>,
}

impl Player {
    pub fn new(arena: Vec2, bombs: u32) -> Self {
        Self {
            body: Body::new(Self::spawn_point(arena), Vec2::splat(PLAYER_SIZE)),
            weapon: WeaponState::default(),
            speed_tier: 0,
            shot_timer: 0.0,
            sub_shot_timer: 0.0,
            shield: 0,
            invincibility: RESPAWN_INVINCIBILITY,
            bombs,
            bits: Vec::new(),
        }
    }

    /// Start position near the bottom center
    pub fn spawn_point(arena: Vec2) -> Vec2 {
        Vec2::new(arena.x / 2.0 - 24.0, arena.y - 100.0)
    }

    pub fn speed(&self) -> f32 {
        PLAYER_BASE_SPEED + PLAYER_SPEED_PER_TIER * self.speed_tier as f32
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincibility > 0.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    /// Back to the start position with a fresh invincibility grant
    pub fn respawn(&mut self, arena: Vec2) {
        self.body.pos = Self::spawn_point(arena);
        self.invincibility = RESPAWN_INVINCIBILITY;
    }

    /// Lose everything a death takes away
    pub fn strip_loadout(&mut self) {
        self.weapon = WeaponState::default();
        self.bits.clear();
        self.shield = 0;
        self.speed_tier = 0;
    }

    pub fn raise_speed_tier(&mut self) {
        self.speed_tier = (self.speed_tier + 1).min(MAX_SPEED_TIER);
    }

    /// Apply a gauge slot to the weapon or to player stats
    pub fn apply_powerup(&mut self, slot: PowerupSlot) {
        match slot {
            PowerupSlot::Shield => self.shield = SHIELD_CHARGES,
            PowerupSlot::Bomb => self.bombs += 1,
            _ => {
                self.weapon.upgrade(slot);
                self.sync_bits();
            }
        }
        log::debug!("powerup applied: {}", slot.label());
    }

    /// Grow or shrink the Bit collection to match the Bit level
    pub fn sync_bits(&mut self) {
        let wanted = self.weapon.bit_level as usize;
        let anchor = self.center();
        while self.bits.len() < wanted {
            self.bits.push(Bit::new(anchor));
        }
        self.bits.truncate(wanted);
    }

    /// Count down invincibility and move inside the playfield
    pub fn steer(&mut self, steering: &Steering, dt: f32, arena: Vec2) {
        if self.invincibility > 0.0 {
            self.invincibility = (self.invincibility - dt).max(0.0);
        }

        let mut dir = Vec2::ZERO;
        if steering.left {
            dir.x -= 1.0;
        }
        if steering.right {
            dir.x += 1.0;
        }
        if steering.up {
            dir.y -= 1.0;
        }
        if steering.down {
            dir.y += 1.0;
        }
        self.body.pos += dir * self.speed() * dt + steering.drag;

        let max = Vec2::new(
            arena.x - self.body.size.x,
            arena.y - self.body.size.y - GAUGE_STRIP,
        )
        .max(Vec2::ZERO);
        self.body.pos = self.body.pos.clamp(Vec2::ZERO, max);
    }

    pub fn update_bits(&mut self, dt: f32) {
        let anchor = self.center();
        let total = self.bits.len();
        for (i, bit) in self.bits.iter_mut().enumerate() {
            bit.update(dt, anchor, i, total);
        }
    }

    /// Run the cooldowns and return whatever was fired this frame
    pub fn fire(&mut self, dt: f32, held: bool) -> Vec<Bullet> {
        self.shot_timer -= dt;
        self.sub_shot_timer -= dt;
        let mut shots = Vec::new();
        if !held {
            return shots;
        }

        if self.shot_timer <= 0.0 {
            self.shot_timer = SHOT_COOLDOWN;
            let muzzle = Vec2::new(self.center().x, self.body.pos.y);
            shots.extend(self.weapon.main_volley(muzzle));
            for bit in &self.bits {
                let muzzle = Vec2::new(bit.body.center().x, bit.body.pos.y);
                shots.extend(self.weapon.main_volley(muzzle));
            }
        }

        if self.weapon.homing_level > 0 && self.sub_shot_timer <= 0.0 {
            self.sub_shot_timer = SUB_SHOT_COOLDOWN;
            let muzzle = Vec2::new(self.center().x, self.body.pos.y);
            shots.extend(self.weapon.homing_volley(muzzle));
        }
        shots
    }
}
