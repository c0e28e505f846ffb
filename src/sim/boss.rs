//! Multi-phase boss state machine
//!
//! A boss enters from above (Intro, invulnerable), fights through an ordered
//! list of phases (Combat), then explodes for a fixed time (Dying,
//! invulnerable) before deactivating.
//!
//! Phase advancement is HP-driven: every phase owns an HP pool and emptying it
//! moves to the next pool with a fresh phase timer. Each phase behavior is a
//! pure function from a [`PhaseContext`] to a list of [`BossAction`]s, which the
//! state machine then applies to the boss body.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::{BulletTint, EnemyBullet};
use super::entity::Body;
use super::pattern::Archetype;
use crate::angle_to_vec;
use crate::consts::*;

/// Everything a phase behavior may look at
#[derive(Debug, Clone, Copy)]
pub struct PhaseContext {
    /// Seconds since this phase started
    pub time: f32,
    pub dt: f32,
    /// Boss top-left and size
    pub pos: Vec2,
    pub size: Vec2,
    pub arena: Vec2,
    pub player_center: Vec2,
    /// Uniform samples in [0, 1) for this frame
    pub rolls: [f32; 8],
}

impl PhaseContext {
    /// X that centers the boss horizontally
    #[inline]
    pub fn home_x(&self) -> f32 {
        self.arena.x / 2.0 - self.size.x / 2.0
    }
}

/// Motion/fire intent produced by a phase behavior
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossAction {
    SetX(f32),
    SetY(f32),
    Shift(Vec2),
    FireAngle {
        angle: f32,
        speed: f32,
        tint: BulletTint,
    },
    FireAtPlayer {
        speed: f32,
    },
    SpawnEscort {
        archetype: Archetype,
        pos: Vec2,
    },
}

pub type PhaseBehavior = fn(&PhaseContext) -> Vec<BossAction>;

/// One combat phase: its HP pool and behavior
#[derive(Debug, Clone, Copy)]
pub struct PhaseSpec {
    pub hp: f32,
    pub behavior: PhaseBehavior,
}

/// Boss lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BossState {
    Intro,
    Combat,
    Dying { timer: f32 },
}

/// Result of a hit on a boss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossHit {
    /// Intro or Dying: nothing happened
    Ignored,
    Damaged,
    PhaseAdvanced(usize),
    /// The final pool emptied; Dying has begun
    Dying,
}

/// Everything a boss frame produced
#[derive(Debug, Clone, Default)]
pub struct BossStep {
    pub bullets: Vec<EnemyBullet>,
    pub escorts: Vec<(Archetype, Vec2)>,
    /// Particle burst origins and sizes
    pub bursts: Vec<(Vec2, usize)>,
    /// The dying timer ran out this frame
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub boss_type: u32,
    pub phases: Vec<PhaseSpec>,
    pub current_phase: usize,
    /// Phase-local timer
    pub timer: f32,
    pub state: BossState,
    pub is_mid_boss: bool,
    pub combat_y: f32,
    /// Multiplier on every emitted bullet speed
    pub speed_scale: f32,
}

impl Boss {
    /// Stage boss of the given type
    pub fn new(boss_type: u32) -> Self {
        Self {
            boss_type,
            phases: phases_for(boss_type),
            current_phase: 0,
            timer: 0.0,
            state: BossState::Intro,
            is_mid_boss: false,
            combat_y: BOSS_COMBAT_Y,
            speed_scale: 1.0,
        }
    }

    /// Weakened checkpoint boss: first phase only, reduced HP and bullet speed
    pub fn mid_boss(boss_type: u32) -> Self {
        let mut phases = phases_for(boss_type);
        phases.truncate(1);
        for phase in phases.iter_mut() {
            phase.hp *= MID_BOSS_HP_SCALE;
        }
        Self {
            phases,
            is_mid_boss: true,
            speed_scale: MID_BOSS_SPEED_SCALE,
            ..Self::new(boss_type)
        }
    }

    /// HP of the first pool
    pub fn initial_hp(&self) -> f32 {
        self.phases.first().map(|p| p.hp).unwrap_or(0.0)
    }

    pub fn score_value(&self) -> u64 {
        if self.is_mid_boss {
            MID_BOSS_SCORE
        } else {
            self.boss_type as u64 * BOSS_SCORE_PER_TYPE
        }
    }

    pub fn is_vulnerable(&self) -> bool {
        self.state == BossState::Combat
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.state, BossState::Dying { .. })
    }

    /// Apply damage to the current pool (`hp` lives on the enemy)
    pub fn hit(&mut self, hp: &mut f32, damage: f32) -> BossHit {
        if !self.is_vulnerable() {
            return BossHit::Ignored;
        }
        *hp -= damage;
        if *hp > 0.0 {
            return BossHit::Damaged;
        }

        self.current_phase += 1;
        match self.phases.get(self.current_phase) {
            Some(next) => {
                *hp = next.hp;
                self.timer = 0.0;
                log::debug!(
                    "boss type {} advanced to phase {}",
                    self.boss_type,
                    self.current_phase
                );
                BossHit::PhaseAdvanced(self.current_phase)
            }
            None => {
                *hp = 0.0;
                self.state = BossState::Dying {
                    timer: BOSS_DYING_DURATION,
                };
                BossHit::Dying
            }
        }
    }

    /// Advance one frame. `rolls` feed both phase behaviors and death sparks.
    pub fn update(
        &mut self,
        body: &mut Body,
        dt: f32,
        arena: Vec2,
        player_center: Vec2,
        rolls: [f32; 8],
    ) -> BossStep {
        let mut step = BossStep::default();
        if !body.is_active() {
            return step;
        }

        match self.state {
            BossState::Intro => {
                body.pos.y += BOSS_INTRO_SPEED * dt;
                if body.pos.y >= self.combat_y {
                    body.pos.y = self.combat_y;
                    self.state = BossState::Combat;
                }
            }
            BossState::Dying { timer } => {
                let timer = timer - dt;
                if rolls[0] < 0.3 {
                    let spark = body.pos + body.size * Vec2::new(rolls[1], rolls[2]);
                    step.bursts.push((spark, 5));
                }
                if timer <= 0.0 {
                    body.deactivate();
                    step.finished = true;
                }
                self.state = BossState::Dying { timer };
            }
            BossState::Combat => {
                self.timer += dt;
                // Guard against an index past the phase list
                let Some(phase) = self.phases.get(self.current_phase) else {
                    return step;
                };
                let ctx = PhaseContext {
                    time: self.timer,
                    dt,
                    pos: body.pos,
                    size: body.size,
                    arena,
                    player_center,
                    rolls,
                };
                for action in (phase.behavior)(&ctx) {
                    self.apply(action, body, player_center, &mut step);
                }
            }
        }
        step
    }

    fn apply(&self, action: BossAction, body: &mut Body, player_center: Vec2, step: &mut BossStep) {
        match action {
            BossAction::SetX(x) => body.pos.x = x,
            BossAction::SetY(y) => body.pos.y = y,
            BossAction::Shift(delta) => body.pos += delta,
            BossAction::FireAngle { angle, speed, tint } => {
                step.bullets.push(self.fire_angle(body, angle, speed, tint));
            }
            BossAction::FireAtPlayer { speed } => {
                step.bullets.push(self.fire_at_player(body, player_center, speed));
            }
            BossAction::SpawnEscort { archetype, pos } => step.escorts.push((archetype, pos)),
        }
    }

    /// Bullet from the bottom-center at `angle` (radians, +y down)
    pub fn fire_angle(&self, body: &Body, angle: f32, speed: f32, tint: BulletTint) -> EnemyBullet {
        let origin = Vec2::new(
            body.pos.x + body.size.x / 2.0 - ENEMY_BULLET_SIZE / 2.0,
            body.pos.y + body.size.y,
        );
        EnemyBullet::new(origin, angle_to_vec(angle, speed * self.speed_scale), tint)
    }

    pub fn fire_at_player(&self, body: &Body, player_center: Vec2, speed: f32) -> EnemyBullet {
        let from = Vec2::new(body.pos.x + body.size.x / 2.0, body.pos.y + body.size.y);
        let d = player_center - from;
        let angle = d.y.atan2(d.x);
        self.fire_angle(body, angle, speed, BulletTint::Orange)
    }
}

/// Phase table for a boss type. Unknown types get a single generic phase.
pub fn phases_for(boss_type: u32) -> Vec<PhaseSpec> {
    let base = 150.0 + 100.0 * boss_type as f32;
    let pool = |mult: f32, behavior: PhaseBehavior| PhaseSpec {
        hp: base * mult,
        behavior,
    };
    match boss_type {
        1 => vec![pool(1.0, cruiser_sweep), pool(1.5, cruiser_barrage)],
        2 => vec![pool(1.5, asteroid_bounce), pool(2.0, asteroid_hop)],
        3 => vec![pool(1.8, fortress_waves), pool(2.2, fortress_cross)],
        4 => vec![pool(2.0, carrier_strafe), pool(2.5, carrier_spiral)],
        5 => vec![
            pool(2.5, core_starburst),
            pool(3.0, core_lock),
            pool(3.5, core_desperation),
        ],
        _ => vec![pool(1.0, cruiser_sweep)],
    }
}

/// True on the one frame whose `[t - dt, t)` span holds a multiple of `period`
#[inline]
fn every(t: f32, dt: f32, period: f32) -> bool {
    let prev = (t - dt).max(0.0);
    (prev / period).ceil() * period < t
}

#[inline]
fn fire(angle: f32, speed: f32) -> BossAction {
    BossAction::FireAngle {
        angle,
        speed,
        tint: BulletTint::Red,
    }
}

// === Stage 1: multi-turret cruiser ===

fn cruiser_sweep(ctx: &PhaseContext) -> Vec<BossAction> {
    let t = ctx.time;
    let mut out = vec![BossAction::SetX(ctx.home_x() + t.sin() * 150.0)];
    if every(t, ctx.dt, 0.8) {
        out.extend([fire(FRAC_PI_2, 350.0), fire(FRAC_PI_2 + 0.1, 350.0), fire(FRAC_PI_2 - 0.1, 350.0)]);
    }
    if every(t, ctx.dt, 1.5) {
        out.extend((-1..=1).map(|i| fire(FRAC_PI_2 + i as f32 * 0.4, 200.0)));
    }
    out
}

fn cruiser_barrage(ctx: &PhaseContext) -> Vec<BossAction> {
    let t = ctx.time;
    let mut out = vec![BossAction::SetX(ctx.home_x() + (t * 2.0).sin() * 180.0)];
    if every(t, ctx.dt, 0.4) {
        out.push(BossAction::FireAtPlayer { speed: 300.0 });
    }
    if every(t, ctx.dt, 1.2) {
        out.extend((-2..=2).map(|i| fire(FRAC_PI_2 + i as f32 * 0.3, 250.0)));
    }
    out
}

// === Stage 2: asteroid base ===

fn asteroid_bounce(ctx: &PhaseContext) -> Vec<BossAction> {
    let t = ctx.time;
    let mut out = vec![
        BossAction::SetX(ctx.home_x() + (t * 0.5).sin() * 100.0),
        BossAction::SetY(BOSS_COMBAT_Y + (t * 2.0).sin() * 80.0),
    ];
    if every(t, ctx.dt, 0.6) {
        // Heavy slow scatter
        out.extend(
            ctx.rolls[..5]
                .iter()
                .map(|r| fire(FRAC_PI_2 + (r - 0.5) * 1.5, 150.0)),
        );
    }
    out
}

fn asteroid_hop(ctx: &PhaseContext) -> Vec<BossAction> {
    let t = ctx.time;
    let mut out = vec![
        BossAction::SetX(ctx.home_x() + (t * 1.5).sin() * 150.0),
        BossAction::SetY(20.0 + ((t * 3.0).sin() * 120.0).abs()),
    ];
    if every(t, ctx.dt, 0.3) {
        out.push(BossAction::FireAtPlayer {
            speed: 250.0 + ctx.rolls[0] * 100.0,
        });
    }
    out
}

// === Stage 3: ground fortress core ===

fn fortress_waves(ctx: &PhaseContext) -> Vec<BossAction> {
    let t = ctx.time;
    let mut out = vec![BossAction::SetX(ctx.home_x() + (t * 0.5).cos() * 50.0)];
    if every(t, ctx.dt, 0.1) {
        out.push(fire(FRAC_PI_2 + (t * 5.0).sin() * 0.8, 200.0));
    }
    if every(t, ctx.dt, 2.0) {
        out.extend([BossAction::FireAtPlayer { speed: 400.0 }; 3]);
    }
    out
}

fn fortress_cross(ctx: &PhaseContext) -> Vec<BossAction> {
    let t = ctx.time;
    let mut out = vec![
        BossAction::SetY(BOSS_COMBAT_Y),
        BossAction::SetX(ctx.home_x() + (t * 3.0).sin() * 200.0),
    ];
    if every(t, ctx.dt, 0.15) {
        out.extend([fire(FRAC_PI_2 - 0.5, 300.0), fire(FRAC_PI_2 + 0.5, 300.0)]);
    }
    if every(t, ctx.dt, 0.5) {
        out.push(BossAction::FireAtPlayer { speed: 300.0 });
    }
    out
}

// === Stage 4: high-speed carrier ===

fn carrier_strafe(ctx: &PhaseContext) -> Vec<BossAction> {
    let t = ctx.time;
    let mut out = vec![
        BossAction::SetX(ctx.home_x() + (t * 3.0).sin() * 220.0),
        BossAction::SetY(30.0 + (t * 4.0).cos() * 20.0),
    ];
    if every(t, ctx.dt, 0.08) {
        out.push(fire(FRAC_PI_2 + (ctx.rolls[0] - 0.5) * 0.2, 400.0));
    }
    // Launch a pair of homing escorts from the wings every few seconds
    if t > ctx.dt && every(t, ctx.dt, 3.0) {
        let wing_y = ctx.pos.y + ctx.size.y;
        out.push(BossAction::SpawnEscort {
            archetype: Archetype::Homing,
            pos: Vec2::new(ctx.pos.x, wing_y),
        });
        out.push(BossAction::SpawnEscort {
            archetype: Archetype::Homing,
            pos: Vec2::new(ctx.pos.x + ctx.size.x - ENEMY_SIZE, wing_y),
        });
    }
    out
}

fn carrier_spiral(ctx: &PhaseContext) -> Vec<BossAction> {
    let t = ctx.time;
    let mut out = vec![BossAction::SetX(ctx.home_x() + (t * 4.0).sin() * 150.0)];
    if every(t, ctx.dt, 0.1) {
        let a = t * 5.0;
        out.extend([
            fire(a, 250.0),
            fire(a + PI, 250.0),
            fire(a + FRAC_PI_2, 250.0),
            fire(a - FRAC_PI_2, 250.0),
        ]);
    }
    out
}

// === Stage 5: master core ===

fn core_starburst(ctx: &PhaseContext) -> Vec<BossAction> {
    let t = ctx.time;
    let mut out = vec![
        BossAction::SetX(ctx.home_x() + (t * 2.5).sin() * 180.0),
        BossAction::SetY(BOSS_COMBAT_Y + (t * 1.5).cos() * 100.0),
    ];
    if every(t, ctx.dt, 1.0) {
        out.extend((0..12).map(|i| fire(TAU / 12.0 * i as f32 + t, 200.0)));
    }
    if every(t, ctx.dt, 0.5) {
        out.push(BossAction::FireAtPlayer { speed: 300.0 });
    }
    out
}

fn core_lock(ctx: &PhaseContext) -> Vec<BossAction> {
    let t = ctx.time;
    let mut out = vec![
        BossAction::SetX(ctx.home_x() + (t * 5.0).sin() * 50.0),
        BossAction::SetY(BOSS_COMBAT_Y),
    ];
    if every(t, ctx.dt, 0.2) {
        out.extend(
            [-0.6, -0.3, 0.3, 0.6]
                .into_iter()
                .map(|off| fire(FRAC_PI_2 + off, 400.0)),
        );
    }
    if every(t, ctx.dt, 0.8) {
        out.extend([BossAction::FireAtPlayer { speed: 350.0 }; 5]);
    }
    out
}

fn core_desperation(ctx: &PhaseContext) -> Vec<BossAction> {
    let t = ctx.time;
    let swing = (t * 10.0).sin() * 1.5;
    let mut out = vec![
        BossAction::SetX(ctx.home_x() + (t * 6.0).sin() * 200.0),
        BossAction::SetY(20.0 + ((t * 5.0).cos() * 150.0).abs()),
    ];
    if every(t, ctx.dt, 0.05) {
        out.extend([
            fire(FRAC_PI_2 + swing, 300.0),
            fire(FRAC_PI_2 + (t * 10.0 + PI).sin() * 1.5, 300.0),
        ]);
    }
    if every(t, ctx.dt, 0.4) {
        out.push(BossAction::FireAtPlayer { speed: 450.0 });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: Vec2 = Vec2::new(480.0, 800.0);
    const PLAYER: Vec2 = Vec2::new(240.0, 700.0);

    fn spawn() -> Body {
        Body::new(
            Vec2::new(ARENA.x / 2.0 - BOSS_SIZE / 2.0, BOSS_SPAWN_Y),
            Vec2::splat(BOSS_SIZE),
        )
    }

    fn finish_intro(boss: &mut Boss, body: &mut Body) {
        for _ in 0..100 {
            boss.update(body, 0.05, ARENA, PLAYER, [0.5; 8]);
            if boss.state == BossState::Combat {
                return;
            }
        }
        panic!("intro never finished");
    }

    fn ctx_at(time: f32) -> PhaseContext {
        PhaseContext {
            time,
            dt: 0.016,
            pos: Vec2::new(144.0, 50.0),
            size: Vec2::splat(BOSS_SIZE),
            arena: ARENA,
            player_center: PLAYER,
            rolls: [0.5; 8],
        }
    }

    #[test]
    fn test_phase_tables() {
        assert_eq!(phases_for(1).len(), 2);
        assert_eq!(phases_for(5).len(), 3);
        assert_eq!(phases_for(0).len(), 1);
        assert_eq!(phases_for(9).len(), 1);
        assert_eq!(phases_for(1)[0].hp, 250.0);
        assert_eq!(phases_for(2)[1].hp, 700.0);
    }

    #[test]
    fn test_intro_is_invulnerable_and_descends() {
        let mut boss = Boss::new(1);
        let mut body = spawn();
        let mut hp = boss.initial_hp();

        assert_eq!(boss.hit(&mut hp, 50.0), BossHit::Ignored);
        assert_eq!(hp, boss.initial_hp());

        let step = boss.update(&mut body, 0.05, ARENA, PLAYER, [0.5; 8]);
        assert!(step.bullets.is_empty());
        assert!(body.pos.y > BOSS_SPAWN_Y);

        finish_intro(&mut boss, &mut body);
        assert_eq!(body.pos.y, BOSS_COMBAT_Y);
        assert_eq!(boss.hit(&mut hp, 1.0), BossHit::Damaged);
    }

    #[test]
    fn test_hp_advances_phases_then_dies_once() {
        let mut boss = Boss::new(1);
        let mut body = spawn();
        finish_intro(&mut boss, &mut body);
        let mut hp = boss.initial_hp();
        boss.timer = 3.0;

        assert_eq!(boss.hit(&mut hp, 1000.0), BossHit::PhaseAdvanced(1));
        assert_eq!(hp, phases_for(1)[1].hp);
        assert_eq!(boss.timer, 0.0);

        assert_eq!(boss.hit(&mut hp, 1000.0), BossHit::Dying);
        assert!(boss.is_dying());
        let phase = boss.current_phase;

        // Repeated hits while dying change nothing
        for _ in 0..5 {
            assert_eq!(boss.hit(&mut hp, 1000.0), BossHit::Ignored);
        }
        assert_eq!(boss.current_phase, phase);
        assert_eq!(hp, 0.0);
    }

    #[test]
    fn test_dying_runs_fixed_duration_then_finishes() {
        let mut boss = Boss::new(2);
        let mut body = spawn();
        finish_intro(&mut boss, &mut body);
        let mut hp = 1.0;
        boss.phases.truncate(1);
        assert_eq!(boss.hit(&mut hp, 5.0), BossHit::Dying);

        let mut finished_frames = 0;
        let mut sparks = 0;
        let mut elapsed = 0.0;
        while body.is_active() {
            let step = boss.update(&mut body, 0.1, ARENA, PLAYER, [0.1; 8]);
            sparks += step.bursts.len();
            finished_frames += step.finished as usize;
            elapsed += 0.1;
            assert!(step.bullets.is_empty());
        }
        assert_eq!(finished_frames, 1);
        assert!(sparks > 0);
        assert!((elapsed - BOSS_DYING_DURATION).abs() < 0.15);
    }

    #[test]
    fn test_mid_boss_is_weaker() {
        let mid = Boss::mid_boss(2);
        let full = Boss::new(2);
        assert!(mid.is_mid_boss);
        assert_eq!(mid.phases.len(), 1);
        assert!(mid.initial_hp() < full.initial_hp());
        assert_eq!(mid.score_value(), MID_BOSS_SCORE);
        assert_eq!(full.score_value(), 10_000);

        let body = Body::new(Vec2::ZERO, Vec2::splat(BOSS_SIZE));
        let fast = full.fire_angle(&body, FRAC_PI_2, 300.0, BulletTint::Red);
        let slow = mid.fire_angle(&body, FRAC_PI_2, 300.0, BulletTint::Red);
        assert!((slow.body.vel.length() - 270.0).abs() < 0.01);
        assert!((fast.body.vel.length() - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_fire_at_player_aims_down_toward_player() {
        let boss = Boss::new(1);
        let body = Body::new(Vec2::new(144.0, 50.0), Vec2::splat(BOSS_SIZE));
        let shot = boss.fire_at_player(&body, PLAYER, 300.0);
        assert!(shot.body.vel.y > 0.0);
        assert!((shot.body.vel.length() - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_out_of_range_phase_is_skipped() {
        let mut boss = Boss::new(1);
        let mut body = spawn();
        finish_intro(&mut boss, &mut body);
        boss.current_phase = 7;
        let step = boss.update(&mut body, 0.016, ARENA, PLAYER, [0.5; 8]);
        assert!(step.bullets.is_empty());
        assert!(body.is_active());
    }

    #[test]
    fn test_behaviors_are_pure() {
        for boss_type in 1..=5 {
            for phase in phases_for(boss_type) {
                let a = (phase.behavior)(&ctx_at(0.05));
                let b = (phase.behavior)(&ctx_at(0.05));
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_cruiser_fires_triple_at_window_start() {
        let actions = cruiser_sweep(&ctx_at(0.016));
        let shots = actions
            .iter()
            .filter(|a| matches!(a, BossAction::FireAngle { .. }))
            .count();
        // Triple laser plus 3-way fan both fire on the first frame
        assert_eq!(shots, 6);
        let quiet = cruiser_sweep(&ctx_at(0.5));
        assert_eq!(quiet.len(), 1);
        // Second frame of the phase stays quiet
        assert_eq!(cruiser_sweep(&ctx_at(0.032)).len(), 1);
    }

    /// Shots emitted over `seconds`, with frame times nudged off the volley grid
    fn volleys_over(behavior: PhaseBehavior, seconds: f32, dt: f32) -> usize {
        let frames = (seconds / dt).round() as usize;
        (1..=frames)
            .map(|i| {
                let mut ctx = ctx_at(0.0013 + i as f32 * dt);
                ctx.dt = dt;
                behavior(&ctx)
                    .iter()
                    .filter(|a| matches!(a, BossAction::FireAngle { .. } | BossAction::FireAtPlayer { .. }))
                    .count()
            })
            .sum()
    }

    #[test]
    fn test_bullet_counts_ignore_frame_rate() {
        for boss_type in 1..=5 {
            for phase in phases_for(boss_type) {
                let at_60 = volleys_over(phase.behavior, 3.0, 1.0 / 60.0);
                let at_144 = volleys_over(phase.behavior, 3.0, 1.0 / 144.0);
                assert_eq!(at_60, at_144, "boss type {boss_type}");
            }
        }
        // 0.8s triple + 1.5s fan after the opening frame: 3 triples and 2 fans
        assert_eq!(volleys_over(cruiser_sweep, 3.0, 1.0 / 60.0), 3 * 3 + 2 * 3);
    }

    #[test]
    fn test_carrier_spawns_escort_pair() {
        let mut ctx = ctx_at(3.005);
        ctx.dt = 0.016;
        let escorts = carrier_strafe(&ctx)
            .into_iter()
            .filter(|a| matches!(a, BossAction::SpawnEscort { .. }))
            .count();
        assert_eq!(escorts, 2);
        let none = carrier_strafe(&ctx_at(1.5))
            .into_iter()
            .filter(|a| matches!(a, BossAction::SpawnEscort { .. }))
            .count();
        assert_eq!(none, 0);
    }
}
