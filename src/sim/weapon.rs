//! Player armament and its upgrade path
//!
//! The powerup gauge selects one of six [`PowerupSlot`]s. Weapon slots mutate
//! [`WeaponState`]; Shield and Bomb are player stats and handled by the player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use crate::consts::*;

pub const MAX_MAIN_LEVEL: u8 = 3;
pub const MAX_HOMING_LEVEL: u8 = 3;
pub const MAX_BIT_LEVEL: u8 = 5;

/// Main weapon families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Normal,
    Laser,
    Wide,
}

/// The fixed gauge table, in gauge order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupSlot {
    Laser,
    Wide,
    Homing,
    Bit,
    Shield,
    Bomb,
}

impl PowerupSlot {
    pub const ALL: [PowerupSlot; 6] = [
        PowerupSlot::Laser,
        PowerupSlot::Wide,
        PowerupSlot::Homing,
        PowerupSlot::Bit,
        PowerupSlot::Shield,
        PowerupSlot::Bomb,
    ];

    /// Slot for a 0-based gauge index; out-of-range indices select nothing
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerupSlot::Laser => "LASER",
            PowerupSlot::Wide => "WIDE",
            PowerupSlot::Homing => "HOMING",
            PowerupSlot::Bit => "BIT",
            PowerupSlot::Shield => "SHIELD",
            PowerupSlot::Bomb => "BOMB",
        }
    }
}

/// Number of gauge slots
pub const POWERUP_SLOT_COUNT: usize = PowerupSlot::ALL.len();

/// Current armament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponState {
    pub kind: WeaponKind,
    /// 1..=3
    pub level: u8,
    /// 0 = not equipped, otherwise 1..=3
    pub homing_level: u8,
    /// 0 = not equipped, otherwise 1..=5; also the number of Bits
    pub bit_level: u8,
}

impl Default for WeaponState {
    fn default() -> Self {
        Self {
            kind: WeaponKind::Normal,
            level: 1,
            homing_level: 0,
            bit_level: 0,
        }
    }
}

impl WeaponState {
    /// Apply a weapon slot. Returns false for slots that are not weapons.
    ///
    /// Same main kind levels up (max 3); a different kind restarts at level 1.
    /// Sub-weapons are independent and level up from 0.
    pub fn upgrade(&mut self, slot: PowerupSlot) -> bool {
        match slot {
            PowerupSlot::Laser => self.upgrade_main(WeaponKind::Laser),
            PowerupSlot::Wide => self.upgrade_main(WeaponKind::Wide),
            PowerupSlot::Homing => {
                self.homing_level = (self.homing_level + 1).min(MAX_HOMING_LEVEL);
            }
            PowerupSlot::Bit => {
                self.bit_level = (self.bit_level + 1).min(MAX_BIT_LEVEL);
            }
            PowerupSlot::Shield | PowerupSlot::Bomb => return false,
        }
        true
    }

    fn upgrade_main(&mut self, kind: WeaponKind) {
        if self.kind == kind {
            self.level = (self.level + 1).min(MAX_MAIN_LEVEL);
        } else {
            self.kind = kind;
            self.level = 1;
        }
    }

    /// Whether applying `slot` would change nothing
    pub fn is_maxed(&self, slot: PowerupSlot) -> bool {
        match slot {
            PowerupSlot::Laser => self.kind == WeaponKind::Laser && self.level >= MAX_MAIN_LEVEL,
            PowerupSlot::Wide => self.kind == WeaponKind::Wide && self.level >= MAX_MAIN_LEVEL,
            PowerupSlot::Homing => self.homing_level >= MAX_HOMING_LEVEL,
            PowerupSlot::Bit => self.bit_level >= MAX_BIT_LEVEL,
            PowerupSlot::Shield | PowerupSlot::Bomb => false,
        }
    }

    /// Damage per overlapping frame for the piercing laser
    pub fn laser_tick_damage(level: u8) -> f32 {
        0.2 + 0.1 * level as f32
    }

    /// Main weapon volley fired from `muzzle` (horizontal center, top edge)
    pub fn main_volley(&self, muzzle: Vec2) -> Vec<Bullet> {
        let half = BULLET_WIDTH / 2.0;
        let straight = |dx: f32, dy: f32| {
            Bullet::standard(
                Vec2::new(muzzle.x + dx - half, muzzle.y + dy),
                Vec2::new(0.0, -BULLET_SPEED),
            )
        };

        match self.kind {
            WeaponKind::Normal => match self.level {
                1 => vec![straight(0.0, 0.0)],
                2 => vec![straight(-8.0, 10.0), straight(8.0, 10.0)],
                _ => vec![
                    straight(-12.0, 16.0),
                    straight(0.0, 0.0),
                    straight(12.0, 16.0),
                ],
            },
            WeaponKind::Laser => {
                let width = self.level as f32 * 8.0 + 8.0;
                vec![Bullet::laser(
                    Vec2::new(muzzle.x - width / 2.0, muzzle.y - 40.0),
                    width,
                    Self::laser_tick_damage(self.level),
                )]
            }
            WeaponKind::Wide => {
                let spread: &[f32] = match self.level {
                    1 => &[-0.2, 0.2],
                    2 => &[-0.3, -0.15, 0.15, 0.3],
                    _ => &[-0.4, -0.2, 0.2, 0.4],
                };
                let mut volley = Vec::with_capacity(spread.len() + 1);
                volley.push(straight(0.0, 0.0));
                for &angle in spread {
                    // Angle measured from straight up
                    let vel = Vec2::new(angle.sin(), -angle.cos()) * BULLET_SPEED;
                    volley.push(Bullet::wide(Vec2::new(muzzle.x - half, muzzle.y), vel));
                }
                volley
            }
        }
    }

    /// Homing fan: 2 missiles per homing level, slight upward bias
    pub fn homing_volley(&self, muzzle: Vec2) -> Vec<Bullet> {
        let count = self.homing_level as usize * 2;
        (0..count)
            .map(|i| {
                let angle = (i as f32 - count as f32 / 2.0 + 0.5) * 0.4;
                let vel = Vec2::new(angle.sin() * HOMING_LAUNCH_SPEED, -HOMING_LAUNCH_SPEED);
                Bullet::homing(Vec2::new(muzzle.x - HOMING_SIZE / 2.0, muzzle.y + 20.0), vel)
            })
            .collect()
    }
}
