//! Collision detection and resolution
//!
//! Runs once per frame against the already-updated entity sets. Every test is
//! an AABB overlap with the inward grace margin. The passes run in a fixed
//! order and resolution stops as soon as the run leaves the Playing phase.

use glam::Vec2;

use super::events::AudioCue;
use super::particle::ParticleTint;
use super::pickup::PickupKind;
use super::player::Player;
use super::state::{Actors, Effects, GamePhase, GameState};
use super::weapon::POWERUP_SLOT_COUNT;
use crate::consts::*;

/// Tally of one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Player bullet impacts on enemies
    pub enemy_hits: u32,
    /// Enemy bullets stopped by Bits
    pub blocked: u32,
    /// Hits absorbed by the shield
    pub absorbed: u32,
    /// Lives lost
    pub lives_lost: u32,
    pub pickups: u32,
}

/// Resolve every interaction for this frame
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let (actors, mut fx) = state.split();
    let Actors {
        player,
        bullets,
        enemy_bullets,
        enemies,
    } = actors;

    // 1. Player bullets vs enemies
    for bullet in bullets.iter_mut() {
        for enemy in enemies.iter_mut() {
            if !bullet.body.is_active() || !enemy.body.is_active() {
                continue;
            }
            if bullet.body.overlaps(&enemy.body) {
                if !bullet.pierces {
                    bullet.body.deactivate();
                }
                enemy.hit(bullet.damage, &mut fx);
                report.enemy_hits += 1;
            }
        }
    }

    // 2. Ramming
    for enemy in enemies.iter_mut() {
        if enemy.body.is_active() && player.body.overlaps(&enemy.body) {
            enemy.hit(RAM_DAMAGE, &mut fx);
            absorb_or_hit(player, &mut fx, &mut report);
            if fx.run.phase != GamePhase::Playing {
                return report;
            }
        }
    }

    // 3. Bits block enemy fire
    for shot in enemy_bullets.iter_mut() {
        if !shot.body.is_active() {
            continue;
        }
        let blocked = player
            .bits
            .iter()
            .any(|bit| bit.body.inflated(BIT_BLOCK_MARGIN).overlaps(&shot.body));
        if blocked {
            shot.body.deactivate();
            fx.burst(shot.body.center(), 3, ParticleTint::Fire);
            report.blocked += 1;
        }
    }

    // 4. Bits hurt whatever touches them
    for enemy in enemies.iter_mut() {
        if !enemy.body.is_active() {
            continue;
        }
        if player.bits.iter().any(|bit| bit.body.overlaps(&enemy.body)) {
            enemy.hit(BIT_DAMAGE, &mut fx);
            fx.burst(enemy.body.center(), 5, ParticleTint::Fire);
        }
    }

    // 5. Enemy fire vs player
    for shot in enemy_bullets.iter_mut() {
        if shot.body.is_active() && player.body.overlaps(&shot.body) {
            shot.body.deactivate();
            absorb_or_hit(player, &mut fx, &mut report);
            if fx.run.phase != GamePhase::Playing {
                return report;
            }
        }
    }

    // 6 + 7. Pickups
    let collected: Vec<PickupKind> = fx
        .pickups
        .iter_mut()
        .filter(|p| p.body.is_active() && player.body.overlaps(&p.body))
        .map(|p| {
            p.body.deactivate();
            p.kind
        })
        .collect();
    for kind in collected {
        report.pickups += 1;
        fx.cue(AudioCue::Powerup);
        match kind {
            PickupKind::PowerUp => {
                fx.run.gauge = fx.run.gauge % POWERUP_SLOT_COUNT + 1;
            }
            PickupKind::SpeedItem => {
                player.raise_speed_tier();
                let feet = Vec2::new(player.center().x, player.body.pos.y + player.body.size.y);
                fx.burst(feet, 5, ParticleTint::Teal);
            }
        }
        fx.add_score(PICKUP_SCORE);
    }

    report
}

fn absorb_or_hit(player: &mut Player, fx: &mut Effects, report: &mut CollisionReport) {
    if player.shield > 0 {
        player.shield -= 1;
        fx.cue(AudioCue::Explosion);
        report.absorbed += 1;
    } else if player_hit(player, fx) {
        report.lives_lost += 1;
    }
}

/// Resolve a hit on an unshielded player. Returns whether a life was lost.
pub fn player_hit(player: &mut Player, fx: &mut Effects) -> bool {
    if player.is_invincible() || fx.config.debug_invincible || fx.run.debug_mode {
        return false;
    }

    fx.cue(AudioCue::Explosion);
    fx.burst(player.center(), 30, ParticleTint::Fire);
    fx.run.lives = fx.run.lives.saturating_sub(1);
    player.strip_loadout();

    if fx.run.lives == 0 {
        log::info!("game over at stage {} with {} points", fx.run.stage, fx.run.score);
        fx.set_phase(GamePhase::GameOver);
        fx.cue(AudioCue::StopBgm);
    } else {
        log::info!("player down, {} lives left", fx.run.lives);
        let arena = fx.arena();
        player.respawn(arena);
    }
    true
}
