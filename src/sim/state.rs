//! Game state and run control
//!
//! Everything the renderer reads each frame lives on [`GameState`] as plain
//! public data. Per-run counters sit in [`RunState`]; side effects that any
//! subsystem may trigger (score, particles, drops, events) go through an
//! [`Effects`] handle borrowed from disjoint fields of the state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::bullet::{Bullet, EnemyBullet};
use super::director::WaveDirector;
use super::enemy::Enemy;
use super::entity::EntityId;
use super::events::{AudioCue, BgmTrack, EventQueue, GameEvent};
use super::particle::{ParticlePool, ParticleTint};
use super::pickup::{Pickup, PickupKind};
use super::player::Player;
use super::weapon::PowerupSlot;
use crate::consts::*;
use crate::settings::SimConfig;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen until the pause flag is pressed again
    Paused,
    /// Stage boss defeated, waiting for `advance_stage`
    StageClear,
    /// Out of lives
    GameOver,
    /// Final stage cleared
    Victory,
}

/// Per-run counters, reset at run/continue/stage boundaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub continues: u32,
    /// 1-based stage number
    pub stage: u32,
    /// 0 = empty, otherwise the pending slot number (1-based)
    pub gauge: usize,
    /// Boss-free seconds elapsed in this stage
    pub stage_time: f32,
    /// Seconds of play since the run (or continue) started
    pub total_time: f32,
    pub boss_active: bool,
    pub mid_boss_spawned: bool,
    /// Score at which the next extra life is granted
    pub next_extend: u64,
    /// Runtime debug toggle; player hits are ignored while set
    pub debug_mode: bool,
}

impl RunState {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            phase: GamePhase::Playing,
            score: 0,
            lives: config.starting_lives,
            continues: config.starting_continues,
            stage: 1,
            gauge: 0,
            stage_time: 0.0,
            total_time: 0.0,
            boss_active: false,
            mid_boss_spawned: false,
            next_extend: config.extend_every,
            debug_mode: false,
        }
    }

    /// The selected gauge slot, if any
    pub fn gauge_slot(&self) -> Option<PowerupSlot> {
        self.gauge.checked_sub(1).and_then(PowerupSlot::from_index)
    }
}

/// Shared side-effect sink handed to entity code during a frame
pub struct Effects<'a> {
    pub run: &'a mut RunState,
    pub particles: &'a mut ParticlePool,
    pub pickups: &'a mut Vec<Pickup>,
    pub events: &'a mut EventQueue,
    pub rng: &'a mut Pcg32,
    pub config: &'a SimConfig,
    /// Player center, where run-level feedback (extends) is drawn
    pub focus: Vec2,
}

impl Effects<'_> {
    #[inline]
    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.config.width, self.config.height)
    }

    #[inline]
    pub fn cue(&mut self, cue: AudioCue) {
        self.events.cue(cue);
    }

    #[inline]
    pub fn roll(&mut self) -> f32 {
        self.rng.random()
    }

    pub fn burst(&mut self, origin: Vec2, count: usize, tint: ParticleTint) {
        self.particles.burst(&mut *self.rng, origin, count, tint);
    }

    pub fn add_score(&mut self, points: u64) {
        if points == 0 {
            return;
        }
        self.run.score += points;
        self.events.push(GameEvent::ScoreChanged {
            delta: points,
            total: self.run.score,
        });

        let step = self.config.extend_every;
        while step > 0 && self.run.score >= self.run.next_extend {
            self.run.next_extend += step;
            self.run.lives = (self.run.lives + 1).min(self.config.max_lives);
            log::info!("extend at {} points, lives {}", self.run.score, self.run.lives);
            self.events.push(GameEvent::ExtraLife {
                lives: self.run.lives,
            });
            self.cue(AudioCue::Powerup);
            let focus = self.focus;
            self.burst(focus, 20, ParticleTint::Green);
        }
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.run.phase == phase {
            return;
        }
        log::info!("phase {:?} -> {:?}", self.run.phase, phase);
        self.run.phase = phase;
        self.events.push(GameEvent::PhaseChanged(phase));
    }

    /// Roll the drop table for a defeated rank-and-file enemy
    pub fn roll_drop(&mut self, at: Vec2) {
        let kind = if self.roll() < POWERUP_DROP_CHANCE {
            PickupKind::PowerUp
        } else if self.roll() < SPEED_ITEM_DROP_CHANCE {
            PickupKind::SpeedItem
        } else {
            return;
        };
        self.pickups.push(Pickup::new(kind, at));
    }
}

/// The entity containers, borrowed alongside [`Effects`]
pub struct Actors<'a> {
    pub player: &'a mut Player,
    pub bullets: &'a mut Vec<Bullet>,
    pub enemy_bullets: &'a mut Vec<EnemyBullet>,
    pub enemies: &'a mut Vec<Enemy>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    pub run: RunState,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    /// Pattern enemies and bosses in spawn order
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticlePool,
    pub director: WaveDirector,
    pub events: EventQueue,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Start a fresh run at stage 1
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let arena = Vec2::new(config.width, config.height);
        let mut state = Self {
            run: RunState::new(&config),
            player: Player::new(arena, config.starting_bombs),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            pickups: Vec::new(),
            particles: ParticlePool::default(),
            director: WaveDirector::new(),
            events: EventQueue::default(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            config,
        };
        state.reset_field();
        state
    }

    #[inline]
    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.config.width, self.config.height)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        EntityId(id)
    }

    /// Split into entity containers and the side-effect sink
    pub fn split(&mut self) -> (Actors<'_>, Effects<'_>) {
        let focus = self.player.center();
        (
            Actors {
                player: &mut self.player,
                bullets: &mut self.bullets,
                enemy_bullets: &mut self.enemy_bullets,
                enemies: &mut self.enemies,
            },
            Effects {
                run: &mut self.run,
                particles: &mut self.particles,
                pickups: &mut self.pickups,
                events: &mut self.events,
                rng: &mut self.rng,
                config: &self.config,
                focus,
            },
        )
    }

    pub fn add_score(&mut self, points: u64) {
        self.split().1.add_score(points);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Active boss, if any, for HP bars
    pub fn boss(&self) -> Option<(&Enemy, &Boss)> {
        self.enemies
            .iter()
            .filter(|e| e.body.is_active())
            .find_map(|e| e.as_boss().map(|b| (e, b)))
    }

    // === Run control ===

    /// Throw the current run away and start over at stage 1
    pub fn new_run(&mut self) {
        log::info!("new run");
        self.run = RunState::new(&self.config);
        self.player = Player::new(self.arena(), self.config.starting_bombs);
        self.events.push(GameEvent::PhaseChanged(GamePhase::Playing));
        self.reset_field();
    }

    /// Spend a continue after Game Over: score and lives reset, stage kept
    pub fn continue_run(&mut self) -> bool {
        if self.run.phase != GamePhase::GameOver || self.run.continues == 0 {
            return false;
        }
        self.run.continues -= 1;
        log::info!(
            "continue at stage {} ({} left)",
            self.run.stage,
            self.run.continues
        );

        self.run.score = 0;
        self.run.next_extend = self.config.extend_every;
        self.run.lives = self.config.starting_lives;
        self.run.stage_time = 0.0;
        self.run.total_time = 0.0;
        self.run.mid_boss_spawned = false;
        self.player = Player::new(self.arena(), self.config.starting_bombs);
        self.split().1.set_phase(GamePhase::Playing);
        self.reset_field();
        true
    }

    /// Move on after a stage clear. Weapons carry over.
    pub fn advance_stage(&mut self) -> bool {
        if self.run.phase != GamePhase::StageClear {
            return false;
        }
        if self.run.stage >= self.config.final_stage {
            let (_, mut fx) = self.split();
            fx.set_phase(GamePhase::Victory);
            fx.cue(AudioCue::PlayBgm(BgmTrack::Ending));
            return true;
        }

        self.run.stage += 1;
        self.run.stage_time = 0.0;
        self.run.mid_boss_spawned = false;
        log::info!("stage {} start", self.run.stage);
        self.split().1.set_phase(GamePhase::Playing);
        self.reset_field();
        true
    }

    /// Clear the playfield and put the player back at the start
    fn reset_field(&mut self) {
        self.enemies.clear();
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.pickups.clear();
        self.run.gauge = 0;
        self.run.boss_active = false;
        self.director.reset();
        let arena = self.arena();
        self.player.respawn(arena);
        self.player.sync_bits();
        self.events
            .cue(AudioCue::PlayBgm(BgmTrack::Stage(self.run.stage)));
    }

    // === Player actions ===

    /// Apply and empty the gauge. No-op while the gauge is empty.
    pub fn activate_powerup(&mut self) -> bool {
        let Some(slot) = self.run.gauge_slot() else {
            return false;
        };
        self.player.apply_powerup(slot);
        self.run.gauge = 0;
        self.events.cue(AudioCue::Powerup);
        true
    }

    /// Spend a bomb: clear enemy fire and blast everything on screen
    pub fn detonate_bomb(&mut self) -> bool {
        if self.player.bombs == 0 {
            return false;
        }
        self.player.bombs -= 1;
        log::debug!("bomb detonated, {} left", self.player.bombs);

        let (actors, mut fx) = self.split();
        actors.enemy_bullets.clear();
        for enemy in actors.enemies.iter_mut() {
            if !enemy.body.is_active() || enemy.body.pos.y <= 0.0 {
                continue;
            }
            enemy.hit(BOMB_DAMAGE, &mut fx);
            let spot = enemy.body.pos + enemy.body.size * Vec2::new(fx.roll(), fx.roll());
            fx.burst(spot, 15, ParticleTint::Blast);
        }
        fx.cue(AudioCue::Explosion);
        fx.events.push(GameEvent::BombDetonated);
        true
    }

    // === Escalation ===

    /// Bring in a boss and suppress regular spawning until it dies
    pub fn spawn_boss(&mut self, mid_boss: bool) {
        let stage = self.run.stage.max(1);
        let (boss, boss_type) = if mid_boss {
            let boss_type = (stage - 1).clamp(1, BOSS_TYPES);
            (Boss::mid_boss(boss_type), boss_type)
        } else {
            let boss_type = stage.min(BOSS_TYPES);
            (Boss::new(boss_type), boss_type)
        };

        let id = self.next_entity_id();
        let arena = self.arena();
        self.enemies.push(Enemy::boss(id, arena, boss));
        self.run.boss_active = true;
        if mid_boss {
            self.run.mid_boss_spawned = true;
        } else {
            let track = if stage == self.config.final_stage {
                BgmTrack::BossFinal
            } else {
                BgmTrack::BossNormal
            };
            self.events.cue(AudioCue::PlayBgm(track));
        }
        log::info!(
            "{} type {} spawned at stage {}",
            if mid_boss { "mid-boss" } else { "boss" },
            boss_type,
            stage
        );
        self.events.push(GameEvent::BossSpawned {
            boss_type,
            mid_boss,
        });
    }

    /// Drop every deactivated entity
    pub fn prune(&mut self) {
        self.bullets.retain(|b| b.body.is_active());
        self.enemy_bullets.retain(|b| b.body.is_active());
        self.enemies.retain(|e| e.body.is_active());
        self.pickups.retain(|p| p.body.is_active());
    }
}
