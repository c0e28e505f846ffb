//! Rank-and-file enemy motion archetypes
//!
//! The archetype set is closed: twenty behaviors with fixed identifiers 0-19.
//! Each frame an archetype reads the enemy's body, its pattern timer, the
//! player position and the arena, then moves the body and returns any bullets
//! it fires. Randomness comes in through [`PatternContext::rolls`] so the
//! step itself is deterministic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::{BulletTint, EnemyBullet};
use super::entity::Body;
use crate::consts::*;
use crate::{aim, angle_to_vec};

/// Motion/attack archetype of a pattern enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Archetype {
    Straight = 0,
    SineWave = 1,
    Homing = 2,
    Dive = 3,
    UTurn = 4,
    StopAndShoot = 5,
    Sniper = 6,
    VFormation = 7,
    Splitter = 8,
    Shielded = 9,
    Warper = 10,
    Bomber = 11,
    Orbit = 12,
    ZigZag = 13,
    Hover = 14,
    Kamikaze = 15,
    Sweeper = 16,
    Burster = 17,
    Drifter = 18,
    Tank = 19,
}

impl Archetype {
    pub const ALL: [Archetype; 20] = [
        Archetype::Straight,
        Archetype::SineWave,
        Archetype::Homing,
        Archetype::Dive,
        Archetype::UTurn,
        Archetype::StopAndShoot,
        Archetype::Sniper,
        Archetype::VFormation,
        Archetype::Splitter,
        Archetype::Shielded,
        Archetype::Warper,
        Archetype::Bomber,
        Archetype::Orbit,
        Archetype::ZigZag,
        Archetype::Hover,
        Archetype::Kamikaze,
        Archetype::Sweeper,
        Archetype::Burster,
        Archetype::Drifter,
        Archetype::Tank,
    ];

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Starting (hit points, downward speed, score value)
    pub fn base_stats(self) -> (f32, f32, u64) {
        match self {
            Archetype::Tank => (15.0, 40.0, ENEMY_SCORE * 5),
            Archetype::Kamikaze => (1.0, 400.0, ENEMY_SCORE),
            Archetype::Warper => (3.0, 0.0, ENEMY_SCORE * 2),
            Archetype::Shielded => (6.0, 50.0, ENEMY_SCORE * 3),
            _ => (2.0, 150.0, ENEMY_SCORE),
        }
    }
}

/// Read-only frame context for pattern steps
#[derive(Debug, Clone, Copy)]
pub struct PatternContext {
    pub dt: f32,
    pub player_center: Vec2,
    pub arena: Vec2,
    /// Two uniform samples in [0, 1) drawn for this enemy this frame
    pub rolls: [f32; 2],
}

/// Per-enemy pattern state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEnemy {
    pub archetype: Archetype,
    /// Pattern-local timer; some archetypes rewind or skip it
    pub timer: f32,
    /// Monotonic age used as the firing clock
    pub age: f32,
    /// Age at the last shot
    pub last_fire: Option<f32>,
    /// Progress through one-shot scripted events
    pub script_step: u8,
    /// Spawn position, reference point for oscillations
    pub origin: Vec2,
}

impl PatternEnemy {
    pub fn new(archetype: Archetype, origin: Vec2) -> Self {
        Self {
            archetype,
            timer: 0.0,
            age: 0.0,
            last_fire: None,
            script_step: 0,
            origin,
        }
    }

    /// Advance one frame and return the bullets fired
    pub fn step(&mut self, body: &mut Body, ctx: &PatternContext) -> Vec<EnemyBullet> {
        let dt = ctx.dt;
        let w = ctx.arena.x;
        let h = ctx.arena.y;
        let mut shots = Vec::new();

        body.integrate(dt);
        self.timer += dt;
        self.age += dt;
        let t = self.timer;

        match self.archetype {
            Archetype::Straight => {}
            Archetype::SineWave => {
                body.pos.x = self.origin.x + (t * 3.0).sin() * 100.0;
            }
            Archetype::Homing => {
                if ctx.player_center.x > body.center().x {
                    body.pos.x += 50.0 * dt;
                } else {
                    body.pos.x -= 50.0 * dt;
                }
            }
            Archetype::Dive => {
                let extra = if t > 1.0 { 300.0 } else { 50.0 };
                body.pos.y += extra * dt;
            }
            Archetype::UTurn => {
                if body.pos.y > h / 2.0 && body.vel.y > 0.0 {
                    body.vel.y = -150.0;
                }
            }
            Archetype::StopAndShoot => {
                if t < 1.0 {
                    // Still entering
                } else if t < 2.0 {
                    body.vel.y = 0.0;
                    shots.extend(self.fire_at_player(body, ctx, 300.0, 0.5));
                } else {
                    body.vel.y = 150.0;
                }
            }
            Archetype::Sniper => {
                if t >= 1.0 && self.script_step == 0 {
                    self.script_step = 1;
                    shots.extend(self.fire_at_player(body, ctx, 500.0, 0.0));
                }
            }
            Archetype::VFormation => {
                let drift = if self.origin.x < w / 2.0 { -50.0 } else { 50.0 };
                body.pos.x += drift * dt;
            }
            Archetype::Splitter => {
                if t >= 2.0 && self.script_step == 0 {
                    self.script_step = 1;
                    shots.extend(self.spread_at_player(body, ctx, 150.0, &[-0.3, 0.0, 0.3]));
                }
            }
            Archetype::Shielded => {
                body.vel.y = 50.0;
            }
            Archetype::Warper => {
                body.vel.y = 0.0;
                if t > 2.0 {
                    body.pos.x = ctx.rolls[0] * (w - 40.0);
                    body.pos.y = ctx.rolls[1] * (h / 2.0);
                    self.timer = 0.0;
                    shots.extend(self.fire_at_player(body, ctx, 300.0, 1.0));
                }
            }
            Archetype::Bomber => {
                if t >= 1.5 && self.script_step == 0 {
                    self.script_step = 1;
                    let origin = muzzle(body);
                    for i in 0..8 {
                        let angle = std::f32::consts::FRAC_PI_4 * i as f32;
                        shots.push(EnemyBullet::new(
                            origin,
                            angle_to_vec(angle, 200.0),
                            BulletTint::Red,
                        ));
                    }
                }
            }
            Archetype::Orbit => {
                body.pos.x = self.origin.x + (t * 2.0).cos() * 50.0;
                body.pos.y = self.origin.y + t * 100.0 + (t * 2.0).sin() * 50.0;
            }
            Archetype::ZigZag => {
                if t % 1.0 < 0.5 {
                    body.pos.x += 100.0 * dt;
                } else {
                    body.pos.x -= 100.0 * dt;
                }
            }
            Archetype::Hover => {
                if body.pos.y > 100.0 {
                    body.vel.y = 0.0;
                    body.pos.x += t.sin() * 50.0 * dt;
                    shots.extend(self.fire_at_player(body, ctx, 300.0, 1.5));
                }
            }
            Archetype::Kamikaze => {
                body.vel.y += 200.0 * dt;
            }
            Archetype::Sweeper => {
                body.pos.x = self.origin.x + t.sin() * w / 2.0;
            }
            Archetype::Burster => {
                // Three-round aimed burst every two seconds
                if self.can_fire(2.0) {
                    self.last_fire = Some(self.age);
                    let from = muzzle(body);
                    for speed in [400.0, 350.0, 300.0] {
                        shots.push(EnemyBullet::new(
                            from,
                            aim(from, ctx.player_center, speed),
                            BulletTint::Orange,
                        ));
                    }
                }
            }
            Archetype::Drifter => {
                body.pos.x += (ctx.rolls[0] - 0.5) * 100.0 * dt;
                body.pos.y += (ctx.rolls[1] - 0.5) * 20.0 * dt;
            }
            Archetype::Tank => {
                body.vel.y = 30.0;
                shots.extend(self.fire_at_player(body, ctx, 100.0, 2.0));
            }
        }

        // Formations stack rows above the screen, so the top edge is measured
        // from this enemy's spawn row
        let ceiling = self.origin.y.min(0.0) - ENEMY_BOUNDS_MARGIN;
        if body.outside(ctx.arena, ENEMY_BOUNDS_MARGIN, ceiling) {
            body.deactivate();
        }
        shots
    }

    #[inline]
    fn can_fire(&self, cooldown: f32) -> bool {
        match self.last_fire {
            Some(last) => self.age - last >= cooldown,
            None => true,
        }
    }

    /// One bullet at the player's center, gated by this enemy's own cooldown
    pub fn fire_at_player(
        &mut self,
        body: &Body,
        ctx: &PatternContext,
        speed: f32,
        cooldown: f32,
    ) -> Option<EnemyBullet> {
        if !self.can_fire(cooldown) {
            return None;
        }
        self.last_fire = Some(self.age);
        let from = muzzle(body);
        Some(EnemyBullet::new(
            from,
            aim(from + Vec2::splat(ENEMY_BULLET_SIZE / 2.0), ctx.player_center, speed),
            BulletTint::Orange,
        ))
    }

    fn spread_at_player(
        &mut self,
        body: &Body,
        ctx: &PatternContext,
        speed: f32,
        offsets: &[f32],
    ) -> Vec<EnemyBullet> {
        self.last_fire = Some(self.age);
        let from = muzzle(body);
        let base = aim(from, ctx.player_center, 1.0);
        let base_angle = base.y.atan2(base.x);
        offsets
            .iter()
            .map(|off| EnemyBullet::new(from, angle_to_vec(base_angle + off, speed), BulletTint::Pink))
            .collect()
    }
}

/// Bullet spawn point: horizontally centered, bottom edge
fn muzzle(body: &Body) -> Vec2 {
    Vec2::new(
        body.pos.x + body.size.x / 2.0 - ENEMY_BULLET_SIZE / 2.0,
        body.pos.y + body.size.y,
    )
}
