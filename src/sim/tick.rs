//! Per-frame simulation step
//!
//! Core game loop: one call per host frame with the frame's input flags and a
//! delta that is clamped before use.

use glam::Vec2;

use super::collision;
use super::director::{self, Escalation};
use super::enemy::Enemy;
use super::events::AudioCue;
use super::player::Steering;
use super::state::{Actors, GamePhase, GameState};
use super::weapon::PowerupSlot;
use crate::consts::*;

/// Input commands for a single frame
///
/// Held flags stay set while the control is down; edge flags are set for
/// exactly one frame by the caller.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Main and sub weapons (held)
    pub fire: bool,
    /// Detonate a bomb (edge)
    pub bomb: bool,
    /// Apply the gauge slot (edge)
    pub activate_powerup: bool,
    /// Pause toggle (edge)
    pub pause: bool,
    /// Debug invincibility toggle (edge)
    pub toggle_debug: bool,
    /// Touch drag delta for this frame
    pub drag: Vec2,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

impl TickInput {
    fn steering(&self) -> Steering {
        Steering {
            up: self.move_up,
            down: self.move_down,
            left: self.move_left,
            right: self.move_right,
            drag: self.drag,
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // A stalled or broken host clock must not poison positions
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };

    if input.toggle_debug {
        state.run.debug_mode = !state.run.debug_mode;
        log::info!("debug invincibility {}", if state.run.debug_mode { "on" } else { "off" });
    }

    // Handle pause toggle
    if input.pause {
        let next = match state.run.phase {
            GamePhase::Playing => Some(GamePhase::Paused),
            GamePhase::Paused => Some(GamePhase::Playing),
            _ => None,
        };
        if let Some(next) = next {
            state.split().1.set_phase(next);
            return;
        }
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let input = &input;
    let arena = state.arena();

    match state.run.phase {
        GamePhase::Paused => {}
        GamePhase::GameOver | GamePhase::Victory => {
            state.particles.update(dt);
        }
        GamePhase::StageClear => {
            // Result screen: the ship can still fly and its shots leave the screen
            state.particles.update(dt);
            for bullet in state.bullets.iter_mut() {
                bullet.update(dt, arena, &state.enemies);
            }
            state.bullets.retain(|b| b.body.is_active());
            state.player.steer(&input.steering(), dt, arena);
            state.player.update_bits(dt);
        }
        GamePhase::Playing => play_frame(state, input, dt),
    }
}

fn play_frame(state: &mut GameState, input: &TickInput, dt: f32) {
    let arena = state.arena();

    state.run.total_time += dt;
    if !state.run.boss_active {
        state.run.stage_time += dt;
    }

    // Director
    let wave = state.director.update(
        dt,
        state.run.stage,
        state.run.boss_active,
        arena.x,
        &mut state.rng,
    );
    for req in wave {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::pattern(id, req.pos, req.archetype));
    }
    match director::escalation(&state.run, &state.config) {
        Some(Escalation::MidBoss) => state.spawn_boss(true),
        Some(Escalation::StageBoss) => state.spawn_boss(false),
        None => {}
    }

    // Player
    state.player.steer(&input.steering(), dt, arena);
    if input.activate_powerup {
        state.activate_powerup();
    }
    if input.bomb {
        state.detonate_bomb();
    }
    state.player.update_bits(dt);
    let shots = state.player.fire(dt, input.fire);
    if !shots.is_empty() {
        state.events.cue(AudioCue::Shot);
        state.bullets.extend(shots);
    }

    // Projectiles
    for bullet in state.bullets.iter_mut() {
        bullet.update(dt, arena, &state.enemies);
    }
    for shot in state.enemy_bullets.iter_mut() {
        shot.update(dt, arena);
    }

    // Enemies and bosses
    let player_center = state.player.center();
    let mut escorts = Vec::new();
    let mut clear_enemy_fire = false;
    {
        let (actors, mut fx) = state.split();
        let Actors {
            enemies,
            enemy_bullets,
            ..
        } = actors;
        for enemy in enemies.iter_mut() {
            let step = enemy.update(dt, player_center, &mut fx);
            enemy_bullets.extend(step.bullets);
            escorts.extend(step.escorts);
            clear_enemy_fire |= step.clear_enemy_fire;
        }
    }
    if clear_enemy_fire {
        state.enemy_bullets.clear();
    }
    for (archetype, pos) in escorts {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::pattern(id, pos, archetype));
    }

    // Cosmetics and pickups
    state.particles.update(dt);
    for pickup in state.pickups.iter_mut() {
        pickup.update(dt, arena);
    }

    if state.run.phase == GamePhase::Playing {
        collision::resolve(state);
    }
    state.prune();
}

/// Demo pilot: hold fire, shadow the nearest target, sidestep incoming fire
fn autopilot(state: &GameState, input: &mut TickInput) {
    input.fire = true;
    let me = state.player.center();

    // Spend the gauge as soon as it reaches a slot we still benefit from
    if let Some(slot) = state.run.gauge_slot() {
        let useful = match slot {
            PowerupSlot::Shield => state.player.shield == 0,
            PowerupSlot::Bomb => true,
            _ => !state.player.weapon.is_maxed(slot),
        };
        input.activate_powerup |= useful;
    }

    let threats: Vec<Vec2> = state
        .enemy_bullets
        .iter()
        .filter(|b| b.body.is_active())
        .map(|b| b.body.center())
        .filter(|c| c.distance(me) < 120.0 && c.y < me.y + 20.0)
        .collect();

    if threats.len() >= 6 && state.player.bombs > 0 && !state.player.is_invincible() {
        input.bomb = true;
    }

    if let Some(closest) = threats
        .iter()
        .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)))
    {
        // Step away from the closest shot, toward open space
        let away = me.x - closest.x;
        let room_left = me.x > PLAYER_SIZE;
        let room_right = me.x < state.arena().x - PLAYER_SIZE;
        if (away >= 0.0 && room_right) || !room_left {
            input.move_right = true;
        } else {
            input.move_left = true;
        }
        input.move_down = closest.y < me.y;
        return;
    }

    // Nothing incoming: grab a pickup or line up under the lowest enemy
    let target_x = state
        .pickups
        .iter()
        .filter(|p| p.body.is_active())
        .map(|p| p.body.center())
        .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)))
        .or_else(|| {
            state
                .enemies
                .iter()
                .filter(|e| e.body.is_active() && e.body.pos.y > 0.0)
                .map(|e| e.body.center())
                .max_by(|a, b| a.y.total_cmp(&b.y))
        })
        .map(|p| p.x);

    if let Some(x) = target_x {
        if x > me.x + 8.0 {
            input.move_right = true;
        } else if x < me.x - 8.0 {
            input.move_left = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;
    use crate::sim::boss::BossState;
    use crate::sim::bullet::{BulletTint, EnemyBullet};
    use crate::sim::events::GameEvent;
    use crate::sim::pickup::{Pickup, PickupKind};

    const DT: f32 = 1.0 / 60.0;

    fn state() -> GameState {
        GameState::new(SimConfig::default(), 12345)
    }

    #[test]
    fn test_tick_pause() {
        let mut state = state();
        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.run.phase, GamePhase::Paused);

        // Nothing advances while paused
        let t = state.run.total_time;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.run.total_time, t);

        tick(&mut state, &input, DT);
        assert_eq!(state.run.phase, GamePhase::Playing);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut state = state();
        tick(&mut state, &TickInput::default(), 5.0);
        assert!((state.run.total_time - MAX_DT).abs() < 1e-6);
        assert!((state.run.stage_time - MAX_DT).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_delta_is_ignored() {
        let mut state = state();
        tick(&mut state, &TickInput::default(), 0.5);
        let pos = state.player.body.pos;
        let t = state.run.stage_time;
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        for dt in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            tick(&mut state, &input, dt);
        }
        assert_eq!(state.run.stage_time, t);
        assert_eq!(state.player.body.pos, pos);
        assert!(state.run.total_time.is_finite());
    }

    #[test]
    fn test_every_formation_member_reaches_play() {
        use crate::sim::director::{Formation, build_formation};

        let formations = [
            Formation::VFormation,
            Formation::Line,
            Formation::Column,
            Formation::Flankers,
            Formation::Scattered,
        ];
        for stage in 1..=8 {
            for formation in formations {
                let mut state = state();
                let width = state.arena().x;
                let wave = build_formation(formation, stage, width, &mut state.rng);
                for req in &wave {
                    let id = state.next_entity_id();
                    state.enemies.push(Enemy::pattern(id, req.pos, req.archetype));
                }
                tick(&mut state, &TickInput::default(), DT);
                assert_eq!(
                    state.enemies.len(),
                    wave.len(),
                    "{formation:?} at stage {stage}"
                );
                assert!(state.enemies.iter().all(|e| e.body.is_active()));
            }
        }
    }

    #[test]
    fn test_fire_spawns_bullets_and_cue() {
        let mut state = state();
        state.drain_events();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.drain_events().contains(&GameEvent::Audio(AudioCue::Shot)));
    }

    #[test]
    fn test_waves_arrive() {
        let mut state = state();
        for _ in 0..(3.0 / DT) as usize {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(!state.enemies.is_empty());
        assert!(state.director.waves >= 1);
    }

    #[test]
    fn test_stage_time_freezes_during_boss() {
        let mut state = state();
        state.run.stage_time = state.config.mid_boss_time;
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.run.boss_active);
        assert!(state.run.mid_boss_spawned);

        let frozen = state.run.stage_time;
        let total = state.run.total_time;
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.run.stage_time, frozen);
        assert!(state.run.total_time > total);
    }

    #[test]
    fn test_stage_boss_waits_for_mid_boss() {
        let mut state = state();
        state.run.stage_time = state.config.stage_boss_time + 10.0;
        tick(&mut state, &TickInput::default(), DT);
        let (_, boss) = state.boss().expect("a boss spawned");
        assert!(boss.is_mid_boss);
    }

    #[test]
    fn test_full_boss_cycle_to_stage_clear() {
        let mut state = state();
        state.config.debug_invincible = true;
        state.run.mid_boss_spawned = true;
        state.run.stage_time = state.config.stage_boss_time;
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.boss().is_some_and(|(_, b)| !b.is_mid_boss));

        // Let it finish the entrance, then drain every pool
        for _ in 0..180 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.boss().map(|(_, b)| b.state), Some(BossState::Combat));
        let (actors, mut fx) = state.split();
        for enemy in actors.enemies.iter_mut().filter(|e| e.is_boss()) {
            for _ in 0..4 {
                enemy.hit(10_000.0, &mut fx);
            }
        }
        state.enemy_bullets.push(EnemyBullet::new(
            Vec2::new(10.0, 10.0),
            Vec2::ZERO,
            BulletTint::Red,
        ));

        for _ in 0..(2.5 / DT) as usize {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.run.phase, GamePhase::StageClear);
        assert!(!state.run.boss_active);
        assert!(state.enemy_bullets.is_empty());
        assert!(state.boss().is_none());

        // Result screen still lets the ship move
        let x = state.player.body.pos.x;
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(state.player.body.pos.x < x);

        assert!(state.advance_stage());
        assert_eq!(state.run.stage, 2);
        assert_eq!(state.run.stage_time, 0.0);
        assert!(!state.run.mid_boss_spawned);
    }

    #[test]
    fn test_game_over_freezes_play() {
        let mut state = state();
        state.player.invincibility = 0.0;
        state.run.lives = 1;
        let at = state.player.center();
        state
            .enemy_bullets
            .push(EnemyBullet::new(at, Vec2::ZERO, BulletTint::Orange));
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.run.phase, GamePhase::GameOver);

        let t = state.run.total_time;
        tick(&mut state, &TickInput { fire: true, ..Default::default() }, DT);
        assert_eq!(state.run.total_time, t);
        assert!(state.bullets.is_empty());

        assert!(state.continue_run());
        assert_eq!(state.run.phase, GamePhase::Playing);
    }

    #[test]
    fn test_powerup_edge_applies_gauge() {
        let mut state = state();
        let at = state.player.body.pos;
        state.pickups.push(Pickup::new(PickupKind::PowerUp, at + Vec2::splat(20.0)));
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.run.gauge, 1);

        let input = TickInput {
            activate_powerup: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.run.gauge, 0);
        assert_eq!(state.player.weapon.kind, crate::sim::weapon::WeaponKind::Laser);
    }

    #[test]
    fn test_debug_toggle() {
        let mut state = state();
        let input = TickInput {
            toggle_debug: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(state.run.debug_mode);
        tick(&mut state, &input, DT);
        assert!(!state.run.debug_mode);
    }

    #[test]
    fn test_determinism() {
        let mut a = state();
        let mut b = state();
        let input = TickInput {
            fire: true,
            move_left: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input, DT);
            tick(&mut b, &input, DT);
        }
        assert_eq!(a.run, b.run);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.player, b.player);
    }

    #[test]
    fn test_idle_mode_survives_a_while() {
        let mut state = state();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..(20.0 / DT) as usize {
            tick(&mut state, &input, DT);
        }
        assert!(state.run.total_time > 0.0);
        assert!(state.run.score > 0, "autopilot should hit something");
    }
}
