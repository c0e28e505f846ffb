//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta, clamped before use
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies; hosts consume [`GameEvent`]s

pub mod boss;
pub mod bullet;
pub mod collision;
pub mod director;
pub mod enemy;
pub mod entity;
pub mod events;
pub mod particle;
pub mod pattern;
pub mod pickup;
pub mod player;
pub mod state;
pub mod tick;
pub mod weapon;

pub use boss::{Boss, BossState};
pub use bullet::{Bullet, BulletTint, EnemyBullet};
pub use collision::CollisionReport;
pub use director::{Formation, WaveDirector};
pub use enemy::{Enemy, EnemyKind};
pub use entity::{Body, EntityId};
pub use events::{AudioCue, BgmTrack, GameEvent};
pub use particle::{Particle, ParticleTint};
pub use pattern::Archetype;
pub use pickup::{Pickup, PickupKind};
pub use player::{Bit, Player};
pub use state::{GamePhase, GameState, RunState};
pub use tick::{TickInput, tick};
pub use weapon::{PowerupSlot, WeaponKind, WeaponState};
