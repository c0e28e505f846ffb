//! Star Shooter - simulation core of a vertical-scrolling bullet-hell shooter
//!
//! Core modules:
//! - `sim`: Frame simulation (entities, patterns, bosses, collisions, waves)
//! - `settings`: Run configuration loaded from JSON
//! - `error`: Configuration errors
//!
//! Rendering, audio playback and input devices live outside this crate. The
//! core consumes [`sim::TickInput`] flags once per frame and exposes
//! [`sim::GameEvent`]s plus plain readable state for a renderer.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::SimConfig;

use glam::Vec2;

/// Game tuning constants
pub mod consts {
    /// Largest delta a single tick may advance (stall protection)
    pub const MAX_DT: f32 = 0.1;

    /// Default arena size (portrait)
    pub const ARENA_WIDTH: f32 = 480.0;
    pub const ARENA_HEIGHT: f32 = 800.0;
    /// Strip at the bottom of the arena reserved for the powerup gauge
    pub const GAUGE_STRIP: f32 = 40.0;

    /// Inward grace on every AABB edge
    pub const COLLISION_MARGIN: f32 = 4.0;
    /// Off-screen slack before bullets/pickups deactivate
    pub const BULLET_BOUNDS_MARGIN: f32 = 50.0;
    /// Off-screen slack before pattern enemies deactivate
    pub const ENEMY_BOUNDS_MARGIN: f32 = 100.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 64.0;
    pub const PLAYER_BASE_SPEED: f32 = 300.0;
    pub const PLAYER_SPEED_PER_TIER: f32 = 60.0;
    pub const MAX_SPEED_TIER: u8 = 3;
    pub const SHOT_COOLDOWN: f32 = 0.12;
    pub const SUB_SHOT_COOLDOWN: f32 = 0.45;
    pub const RESPAWN_INVINCIBILITY: f32 = 3.0;
    pub const SHIELD_CHARGES: u32 = 10;

    /// Player bullets
    pub const BULLET_WIDTH: f32 = 8.0;
    pub const BULLET_HEIGHT: f32 = 16.0;
    pub const BULLET_SPEED: f32 = 600.0;
    pub const LASER_SPEED: f32 = 1200.0;
    pub const LASER_HEIGHT: f32 = 64.0;
    pub const HOMING_SIZE: f32 = 12.0;
    pub const HOMING_LAUNCH_SPEED: f32 = 300.0;
    pub const HOMING_RETARGET_INTERVAL: f32 = 0.5;
    pub const HOMING_LIFESPAN: f32 = 3.0;
    pub const HOMING_STEER: f32 = 5.0;

    /// Bits (orbiting satellites)
    pub const BIT_SIZE: f32 = 20.0;
    pub const BIT_ORBIT_RADIUS: f32 = 60.0;
    pub const BIT_ORBIT_SPEED: f32 = 3.0;
    pub const BIT_FOLLOW: f32 = 10.0;
    /// Extra catch area around a Bit when blocking enemy bullets
    pub const BIT_BLOCK_MARGIN: f32 = 10.0;
    pub const BIT_DAMAGE: f32 = 100.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 64.0;
    pub const ENEMY_BULLET_SIZE: f32 = 16.0;
    pub const ENEMY_SCORE: u64 = 100;
    /// Body-contact damage dealt to an enemy by the player ship
    pub const RAM_DAMAGE: f32 = 100.0;
    pub const BOMB_DAMAGE: f32 = 100.0;

    /// Bosses
    pub const BOSS_SIZE: f32 = 192.0;
    pub const BOSS_SPAWN_Y: f32 = -150.0;
    pub const BOSS_COMBAT_Y: f32 = 50.0;
    pub const BOSS_INTRO_SPEED: f32 = 100.0;
    pub const BOSS_DYING_DURATION: f32 = 2.0;
    pub const BOSS_HIT_SCORE: u64 = 10;
    pub const BOSS_SCORE_PER_TYPE: u64 = 5000;
    pub const MID_BOSS_SCORE: u64 = 3000;
    pub const MID_BOSS_HP_SCALE: f32 = 0.4;
    pub const MID_BOSS_SPEED_SCALE: f32 = 0.9;
    pub const BOSS_TYPES: u32 = 5;

    /// Pickups
    pub const PICKUP_SIZE: f32 = 24.0;
    pub const PICKUP_FALL_SPEED: f32 = 50.0;
    pub const PICKUP_SCORE: u64 = 500;
    pub const POWERUP_DROP_CHANCE: f32 = 0.1;
    pub const SPEED_ITEM_DROP_CHANCE: f32 = 0.04;

    /// Wave director
    pub const SPAWN_INTERVAL_BASE: f32 = 2.0;
    pub const SPAWN_INTERVAL_PER_STAGE: f32 = 0.25;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.7;

    /// Cosmetic particle pool cap
    pub const MAX_PARTICLES: usize = 512;
}

/// Unit vector for `angle` (radians, +y down) scaled by `speed`
#[inline]
pub fn angle_to_vec(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

/// Velocity of magnitude `speed` pointing from `from` to `to`
///
/// Coincident points aim straight down rather than producing NaN.
#[inline]
pub fn aim(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let dir = (to - from).try_normalize().unwrap_or(Vec2::Y);
    dir * speed
}
