//! Player and enemy projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::entity::{Body, EntityId};
use crate::consts::*;

/// Homing guidance state
///
/// The target is a lookup handle only; it is revalidated against the live
/// enemy list and re-acquired when it disappears or the interval elapses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Homing {
    pub target: Option<EntityId>,
    pub retarget_timer: f32,
    /// Seconds left before self-destruct
    pub life: f32,
}

/// A player-owned bullet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    /// Survives hits (laser)
    pub pierces: bool,
    pub damage: f32,
    pub homing: Option<Homing>,
}

impl Bullet {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2, damage: f32) -> Self {
        Self {
            body: Body::new(pos, size).with_velocity(vel),
            pierces: false,
            damage,
            homing: None,
        }
    }

    /// Plain 8x16 shot dealing 1 damage
    pub fn standard(pos: Vec2, vel: Vec2) -> Self {
        Self::new(pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT), vel, 1.0)
    }

    /// Angled side shot of the wide weapon
    pub fn wide(pos: Vec2, vel: Vec2) -> Self {
        Self::new(pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT), vel, 0.75)
    }

    pub fn laser(pos: Vec2, width: f32, tick_damage: f32) -> Self {
        let mut bullet = Self::new(
            pos,
            Vec2::new(width, LASER_HEIGHT),
            Vec2::new(0.0, -LASER_SPEED),
            tick_damage,
        );
        bullet.pierces = true;
        bullet
    }

    pub fn homing(pos: Vec2, vel: Vec2) -> Self {
        let mut bullet = Self::new(pos, Vec2::splat(HOMING_SIZE), vel, 1.0);
        bullet.homing = Some(Homing {
            target: None,
            retarget_timer: 0.0,
            life: HOMING_LIFESPAN,
        });
        bullet
    }

    /// Advance one frame. `enemies` is only read for homing target lookup.
    pub fn update(&mut self, dt: f32, arena: Vec2, enemies: &[Enemy]) {
        if !self.body.is_active() {
            return;
        }
        if self.body.out_of_bounds(arena, BULLET_BOUNDS_MARGIN) {
            self.body.deactivate();
            return;
        }

        self.body.integrate(dt);

        if let Some(homing) = self.homing.as_mut() {
            homing.life -= dt;
            if homing.life <= 0.0 {
                self.body.deactivate();
                return;
            }
            steer(&mut self.body, homing, dt, enemies);
        }

        self.body.cull_out_of_bounds(arena, BULLET_BOUNDS_MARGIN);
    }
}

fn steer(body: &mut Body, homing: &mut Homing, dt: f32, enemies: &[Enemy]) {
    homing.retarget_timer += dt;

    let target_alive = homing
        .target
        .and_then(|id| find_enemy(enemies, id))
        .is_some();
    if !target_alive || homing.retarget_timer > HOMING_RETARGET_INTERVAL {
        homing.retarget_timer = 0.0;
        homing.target = acquire_target(body, enemies);
    }

    // No target: keep flying straight
    let Some(target) = homing.target.and_then(|id| find_enemy(enemies, id)) else {
        return;
    };

    let speed = body.vel.length();
    let speed = if speed > 0.0 { speed } else { 400.0 };
    let to_target = target.body.center() - body.center();
    let desired = to_target.try_normalize().unwrap_or(Vec2::NEG_Y) * speed;
    body.vel += (desired - body.vel) * (HOMING_STEER * dt).min(1.0);
}

fn find_enemy(enemies: &[Enemy], id: EntityId) -> Option<&Enemy> {
    enemies
        .iter()
        .find(|e| e.id == id && e.body.is_active())
}

/// Nearest active enemy that is not far below the missile
fn acquire_target(body: &Body, enemies: &[Enemy]) -> Option<EntityId> {
    let origin = body.center();
    enemies
        .iter()
        .filter(|e| e.body.is_active())
        .filter(|e| e.body.center().y - origin.y < 100.0)
        .min_by(|a, b| {
            let da = a.body.center().distance_squared(origin);
            let db = b.body.center().distance_squared(origin);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.id)
}

/// Palette hint for enemy bullets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BulletTint {
    #[default]
    Orange,
    Red,
    Pink,
}

/// An enemy-owned bullet with a fixed 16x16 hit box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub body: Body,
    pub tint: BulletTint,
}

impl EnemyBullet {
    pub fn new(pos: Vec2, vel: Vec2, tint: BulletTint) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(ENEMY_BULLET_SIZE)).with_velocity(vel),
            tint,
        }
    }

    pub fn update(&mut self, dt: f32, arena: Vec2) {
        if !self.body.is_active() {
            return;
        }
        if self.body.out_of_bounds(arena, BULLET_BOUNDS_MARGIN) {
            self.body.deactivate();
            return;
        }
        self.body.integrate(dt);
        self.body.cull_out_of_bounds(arena, BULLET_BOUNDS_MARGIN);
    }
}
