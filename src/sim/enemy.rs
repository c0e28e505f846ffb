//! Hostile entities: rank-and-file pattern enemies and bosses
//!
//! Both share one container so collision, bombs and homing treat them the
//! same way; the behavior differs only in [`EnemyKind`].

use glam::Vec2;
use rand::Rng;

use super::boss::{Boss, BossHit};
use super::bullet::EnemyBullet;
use super::entity::{Body, EntityId};
use super::events::{AudioCue, GameEvent};
use super::particle::ParticleTint;
use super::pattern::{Archetype, PatternContext, PatternEnemy};
use super::state::{Effects, GamePhase};
use crate::consts::*;

#[derive(Debug, Clone)]
pub enum EnemyKind {
    Pattern(PatternEnemy),
    Boss(Box<Boss>),
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub body: Body,
    pub hp: f32,
    pub score_value: u64,
    /// Cell in the enemy sprite sheet; bosses use their own art
    pub sprite_index: Option<u8>,
    pub kind: EnemyKind,
}

/// What an enemy produced during its update
#[derive(Debug, Clone, Default)]
pub struct EnemyStep {
    pub bullets: Vec<EnemyBullet>,
    /// Pattern enemies a boss wants launched
    pub escorts: Vec<(Archetype, Vec2)>,
    /// A stage boss finished dying; enemy fire should be cleared
    pub clear_enemy_fire: bool,
}

impl Enemy {
    pub fn pattern(id: EntityId, pos: Vec2, archetype: Archetype) -> Self {
        let (hp, vy, score_value) = archetype.base_stats();
        Self {
            id,
            body: Body::new(pos, Vec2::splat(ENEMY_SIZE)).with_velocity(Vec2::new(0.0, vy)),
            hp,
            score_value,
            sprite_index: Some(archetype.id()),
            kind: EnemyKind::Pattern(PatternEnemy::new(archetype, pos)),
        }
    }

    /// Boss entering from above the arena's top center
    pub fn boss(id: EntityId, arena: Vec2, boss: Boss) -> Self {
        let pos = Vec2::new(arena.x / 2.0 - BOSS_SIZE / 2.0, BOSS_SPAWN_Y);
        Self {
            id,
            body: Body::new(pos, Vec2::splat(BOSS_SIZE)),
            hp: boss.initial_hp(),
            score_value: boss.score_value(),
            sprite_index: None,
            kind: EnemyKind::Boss(Box::new(boss)),
        }
    }

    pub fn as_boss(&self) -> Option<&Boss> {
        match &self.kind {
            EnemyKind::Boss(boss) => Some(boss),
            EnemyKind::Pattern(_) => None,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.as_boss().is_some()
    }

    /// Take damage. Inactive enemies ignore further hits.
    pub fn hit(&mut self, damage: f32, fx: &mut Effects) {
        if !self.body.is_active() {
            return;
        }
        let center = self.body.center();

        match &mut self.kind {
            EnemyKind::Pattern(_) => {
                self.hp -= damage;
                if self.hp <= 0.0 {
                    self.body.deactivate();
                    fx.add_score(self.score_value);
                    fx.cue(AudioCue::EnemyDefeat);
                    fx.burst(center, 15, ParticleTint::Fire);
                    fx.roll_drop(self.body.pos);
                }
            }
            EnemyKind::Boss(boss) => match boss.hit(&mut self.hp, damage) {
                BossHit::Ignored => {}
                BossHit::Damaged => {
                    fx.add_score(BOSS_HIT_SCORE);
                    fx.cue(AudioCue::BossHit);
                }
                BossHit::PhaseAdvanced(phase) => {
                    fx.add_score(BOSS_HIT_SCORE);
                    fx.cue(AudioCue::Explosion);
                    fx.burst(center, 20, ParticleTint::White);
                    fx.events.push(GameEvent::BossPhaseAdvanced { phase });
                }
                BossHit::Dying => {
                    fx.add_score(BOSS_HIT_SCORE);
                    fx.cue(AudioCue::Explosion);
                    fx.burst(center, 30, ParticleTint::Fire);
                    log::info!("boss type {} dying", boss.boss_type);
                }
            },
        }
    }

    /// Advance motion and attacks for one frame
    pub fn update(&mut self, dt: f32, player_center: Vec2, fx: &mut Effects) -> EnemyStep {
        let mut step = EnemyStep::default();
        if !self.body.is_active() {
            return step;
        }
        let arena = fx.arena();

        match &mut self.kind {
            EnemyKind::Pattern(pattern) => {
                let ctx = PatternContext {
                    dt,
                    player_center,
                    arena,
                    rolls: [fx.roll(), fx.roll()],
                };
                step.bullets = pattern.step(&mut self.body, &ctx);
            }
            EnemyKind::Boss(boss) => {
                let rolls: [f32; 8] = fx.rng.random();
                let out = boss.update(&mut self.body, dt, arena, player_center, rolls);
                for (origin, count) in out.bursts {
                    fx.burst(origin, count, ParticleTint::Fire);
                }
                step.bullets = out.bullets;
                step.escorts = out.escorts;

                if out.finished {
                    fx.add_score(self.score_value);
                    fx.run.boss_active = false;
                    fx.events.push(GameEvent::BossDefeated {
                        mid_boss: boss.is_mid_boss,
                    });
                    if boss.is_mid_boss {
                        log::info!("mid-boss defeated, spawning resumes");
                    } else {
                        log::info!("stage {} boss defeated", fx.run.stage);
                        fx.set_phase(GamePhase::StageClear);
                        fx.cue(AudioCue::VictoryJingle);
                        step.clear_enemy_fire = true;
                    }
                }
            }
        }
        step
    }
}
