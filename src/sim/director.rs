//! Wave director: timed formation spawning and boss escalation
//!
//! Regular waves come on a countdown that shortens with the stage number and
//! pause entirely while a boss is on the field. Escalation runs off boss-free
//! stage time: the mid-boss first, then the stage boss once the mid-boss has
//! been seen.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pattern::Archetype;
use super::state::RunState;
use crate::consts::*;
use crate::settings::SimConfig;

/// Formation templates, chosen by a weighted roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formation {
    /// Chevron with a distinct leader
    VFormation,
    /// Horizontal line
    Line,
    /// Vertical column
    Column,
    /// Mirrored pairs from both edges
    Flankers,
    /// One to three loose spawns of a single archetype
    Scattered,
}

impl Formation {
    /// Weighted pick: 25% V, 25% line, 15% column, 15% flankers, 20% scattered
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.25 {
            Formation::VFormation
        } else if roll < 0.5 {
            Formation::Line
        } else if roll < 0.65 {
            Formation::Column
        } else if roll < 0.8 {
            Formation::Flankers
        } else {
            Formation::Scattered
        }
    }
}

/// One enemy the director wants on the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub archetype: Archetype,
    pub pos: Vec2,
}

impl SpawnRequest {
    fn new(archetype: Archetype, x: f32, y: f32) -> Self {
        Self {
            archetype,
            pos: Vec2::new(x, y),
        }
    }
}

/// Boss escalation due this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    MidBoss,
    StageBoss,
}

/// Seconds between waves at `stage`
pub fn spawn_interval(stage: u32) -> f32 {
    (SPAWN_INTERVAL_BASE - stage as f32 * SPAWN_INTERVAL_PER_STAGE).max(SPAWN_INTERVAL_FLOOR)
}

/// Formation size multiplier; grows 10% per stage past the third
pub fn difficulty(stage: u32) -> f32 {
    if stage >= 4 {
        1.0 + (stage - 3) as f32 * 0.1
    } else {
        1.0
    }
}

/// Which boss, if any, should enter now
pub fn escalation(run: &RunState, config: &SimConfig) -> Option<Escalation> {
    if run.boss_active {
        return None;
    }
    if !run.mid_boss_spawned && run.stage_time >= config.mid_boss_time {
        return Some(Escalation::MidBoss);
    }
    if run.mid_boss_spawned && run.stage_time >= config.stage_boss_time {
        return Some(Escalation::StageBoss);
    }
    None
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDirector {
    /// Countdown to the next wave
    pub spawn_timer: f32,
    /// Waves launched this stage
    pub waves: u32,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveDirector {
    pub fn new() -> Self {
        Self {
            spawn_timer: SPAWN_INTERVAL_BASE,
            waves: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Run the countdown; returns the next wave when it fires
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        stage: u32,
        boss_active: bool,
        arena_width: f32,
        rng: &mut R,
    ) -> Vec<SpawnRequest> {
        self.spawn_timer -= dt;
        if self.spawn_timer > 0.0 || boss_active {
            return Vec::new();
        }
        self.spawn_timer = spawn_interval(stage);
        self.waves += 1;

        let formation = Formation::from_roll(rng.random());
        let wave = build_formation(formation, stage, arena_width, rng);
        log::debug!(
            "stage {} wave {}: {:?} x{}",
            stage,
            self.waves,
            formation,
            wave.len()
        );
        wave
    }
}

/// Instantiate a formation template for `stage`
pub fn build_formation<R: Rng>(
    formation: Formation,
    stage: u32,
    w: f32,
    rng: &mut R,
) -> Vec<SpawnRequest> {
    let mult = difficulty(stage);
    let sized = |base: u32| (base as f32 * mult).round() as usize;
    let mut wave = Vec::new();

    match formation {
        Formation::VFormation => {
            let center_x = rng.random::<f32>() * (w - 120.0) + 60.0;
            let leader = if stage >= 4 { Archetype::Burster } else { Archetype::SineWave };
            let wing = if stage >= 3 { Archetype::Sniper } else { Archetype::SineWave };
            let count = sized(3 + stage / 2);
            let mid = count / 2;
            for i in 0..count {
                let archetype = if i == mid { leader } else { wing };
                let x = center_x + (i as f32 - mid as f32) * 40.0;
                wave.push(SpawnRequest::new(archetype, x, -50.0 - i as f32 * 30.0));
            }
        }
        Formation::Line => {
            let start_x = rng.random::<f32>() * (w - 240.0) + 40.0;
            let archetype = if stage >= 3 { Archetype::StopAndShoot } else { Archetype::Straight };
            for i in 0..sized(3 + stage / 2) {
                wave.push(SpawnRequest::new(archetype, start_x + i as f32 * 40.0, -50.0));
            }
        }
        Formation::Column => {
            let x = rng.random::<f32>() * (w - 40.0);
            let archetype = if stage >= 4 { Archetype::Tank } else { Archetype::Homing };
            let mut depth = 2;
            if stage >= 2 {
                depth += 1;
            }
            if stage >= 4 {
                depth += 1;
            }
            if stage >= 4 && mult >= 1.1 {
                depth += 1;
            }
            if stage >= 5 && mult >= 1.2 {
                depth += 1;
            }
            for i in 0..depth {
                wave.push(SpawnRequest::new(archetype, x, -50.0 - i as f32 * 40.0));
            }
        }
        Formation::Flankers => {
            let archetype = if stage >= 3 { Archetype::Dive } else { Archetype::ZigZag };
            let pairs: &[(f32, f32)] = match stage {
                0..=2 => &[(40.0, -50.0)],
                3 => &[(40.0, -50.0), (120.0, -80.0)],
                4 => &[(40.0, -50.0), (120.0, -80.0), (200.0, -110.0)],
                _ => &[(40.0, -50.0), (120.0, -80.0), (200.0, -110.0), (80.0, -140.0)],
            };
            for &(inset, y) in pairs {
                wave.push(SpawnRequest::new(archetype, inset, y));
                wave.push(SpawnRequest::new(archetype, w - inset - 40.0, y));
            }
        }
        Formation::Scattered => {
            let pool: &[Archetype] = if stage <= 2 {
                &[Archetype::Straight, Archetype::SineWave, Archetype::Hover]
            } else if stage <= 4 {
                &[
                    Archetype::Warper,
                    Archetype::Bomber,
                    Archetype::Burster,
                    Archetype::Kamikaze,
                ]
            } else {
                &[
                    Archetype::Tank,
                    Archetype::Bomber,
                    Archetype::Sniper,
                    Archetype::Sweeper,
                ]
            };
            let archetype = pool[rng.random_range(0..pool.len())];
            let x = rng.random::<f32>() * (w - 40.0);
            wave.push(SpawnRequest::new(archetype, x, -50.0));
            if rng.random::<f32>() > 0.5 {
                wave.push(SpawnRequest::new(archetype, w - x, -80.0));
            }
            if stage >= 4 && rng.random::<f32>() > 0.5 {
                wave.push(SpawnRequest::new(archetype, rng.random::<f32>() * (w - 40.0), -110.0));
            }
            if stage >= 5 {
                wave.push(SpawnRequest::new(archetype, rng.random::<f32>() * (w - 40.0), -150.0));
            }
        }
    }
    wave
}
