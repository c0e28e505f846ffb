//! Property tests for the simulation invariants

use glam::Vec2;
use proptest::prelude::*;

use star_shooter::SimConfig;
use star_shooter::consts::*;
use star_shooter::sim::boss::{Boss, BossHit};
use star_shooter::sim::collision;
use star_shooter::sim::entity::{Body, aabb_overlap};
use star_shooter::sim::{
    BossState, Bullet, BulletTint, EnemyBullet, GameState, Pickup, PickupKind, PowerupSlot,
    WeaponKind, WeaponState,
};

const ARENA: Vec2 = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);

fn slot() -> impl Strategy<Value = PowerupSlot> {
    (0usize..6).prop_map(|i| PowerupSlot::ALL[i])
}

fn quiet_state(seed: u64) -> GameState {
    let mut s = GameState::new(SimConfig::default(), seed);
    s.player.invincibility = 0.0;
    s.drain_events();
    s
}

/// A point strictly outside the bullet culling window on at least one axis
fn outside_point() -> impl Strategy<Value = Vec2> {
    let m = BULLET_BOUNDS_MARGIN;
    prop_oneof![
        (-2000.0f32..-m - 1.0, -100.0f32..900.0).prop_map(|(x, y)| Vec2::new(x, y)),
        (ARENA_WIDTH + m + 1.0..3000.0f32, -100.0f32..900.0).prop_map(|(x, y)| Vec2::new(x, y)),
        (-100.0f32..600.0, -2000.0f32..-m - 1.0).prop_map(|(x, y)| Vec2::new(x, y)),
        (-100.0f32..600.0, ARENA_HEIGHT + m + 1.0..3000.0f32).prop_map(|(x, y)| Vec2::new(x, y)),
    ]
}

proptest! {
    #[test]
    fn deactivated_bullets_stay_dead(
        x in -500.0f32..1000.0,
        y in -500.0f32..1300.0,
        vx in -800.0f32..800.0,
        vy in -800.0f32..800.0,
        frames in 1usize..30,
    ) {
        let mut shot = EnemyBullet::new(Vec2::new(x, y), Vec2::new(vx, vy), BulletTint::Red);
        let mut bullet = Bullet::standard(Vec2::new(x, y), Vec2::new(vx, vy));
        shot.body.deactivate();
        bullet.body.deactivate();
        let before = shot.body.pos;
        for _ in 0..frames {
            shot.update(1.0 / 60.0, ARENA);
            bullet.update(1.0 / 60.0, ARENA, &[]);
            prop_assert!(!shot.body.is_active());
            prop_assert!(!bullet.body.is_active());
        }
        // Inactive bodies are not advanced either
        prop_assert_eq!(shot.body.pos, before);
    }

    #[test]
    fn out_of_bounds_bullets_deactivate(pos in outside_point(), vx in -300.0f32..300.0, vy in -300.0f32..300.0) {
        let mut shot = EnemyBullet::new(pos, Vec2::new(vx, vy), BulletTint::Pink);
        shot.update(1.0 / 60.0, ARENA);
        prop_assert!(!shot.body.is_active());

        let mut bullet = Bullet::standard(pos, Vec2::new(vx, vy));
        bullet.update(1.0 / 60.0, ARENA, &[]);
        prop_assert!(!bullet.body.is_active());
    }

    #[test]
    fn pickups_never_revive(x in 0.0f32..480.0, y in 700.0f32..1000.0, frames in 1usize..200) {
        let mut pickup = Pickup::new(PickupKind::SpeedItem, Vec2::new(x, y));
        let mut was_active = true;
        for _ in 0..frames {
            pickup.update(0.1, ARENA);
            let now = pickup.body.is_active();
            prop_assert!(was_active || !now);
            was_active = now;
        }
    }

    #[test]
    fn weapon_upgrade_rule(slots in prop::collection::vec(slot(), 1..20)) {
        let mut weapon = WeaponState::default();
        for s in slots {
            let before = weapon;
            weapon.upgrade(s);
            let main = match s {
                PowerupSlot::Laser => Some(WeaponKind::Laser),
                PowerupSlot::Wide => Some(WeaponKind::Wide),
                _ => None,
            };
            match main {
                Some(kind) if kind == before.kind => {
                    prop_assert_eq!(weapon.level, (before.level + 1).min(3));
                }
                Some(kind) => {
                    prop_assert_eq!(weapon.kind, kind);
                    prop_assert_eq!(weapon.level, 1);
                }
                None => {
                    prop_assert_eq!(weapon.kind, before.kind);
                    prop_assert_eq!(weapon.level, before.level);
                }
            }
        }
    }

    #[test]
    fn boss_ignores_hits_outside_combat(boss_type in 1u32..=5, damage in 0.0f32..10_000.0) {
        let mut boss = Boss::new(boss_type);
        let mut hp = boss.initial_hp();
        prop_assert_eq!(boss.hit(&mut hp, damage), BossHit::Ignored);
        prop_assert_eq!(hp, boss.initial_hp());
        prop_assert_eq!(boss.current_phase, 0);

        boss.state = BossState::Dying { timer: 1.0 };
        let phase = boss.current_phase;
        prop_assert_eq!(boss.hit(&mut hp, damage), BossHit::Ignored);
        prop_assert_eq!(hp, boss.initial_hp());
        prop_assert_eq!(boss.current_phase, phase);
    }

    #[test]
    fn boss_dies_exactly_once(
        boss_type in 1u32..=5,
        hits in prop::collection::vec(1.0f32..2_000.0, 1..200),
    ) {
        let mut boss = Boss::new(boss_type);
        boss.state = BossState::Combat;
        let mut hp = boss.initial_hp();
        let mut deaths = 0;
        for damage in hits {
            if boss.hit(&mut hp, damage) == BossHit::Dying {
                deaths += 1;
            }
            prop_assert!(boss.current_phase <= boss.phases.len());
        }
        prop_assert!(deaths <= 1);
        prop_assert_eq!(deaths == 1, boss.is_dying());
    }

    #[test]
    fn near_misses_inside_margin_do_not_collide(size in 20u32..100, gap in 0u32..40) {
        let s = size as f32;
        let m = COLLISION_MARGIN;
        let a = Body::new(Vec2::ZERO, Vec2::splat(s));
        // Touching once both boxes shrink by the margin, then pulled apart
        let b = Body::new(Vec2::new(s - 2.0 * m + gap as f32 * 0.5, 0.0), Vec2::splat(s));
        prop_assert!(!aabb_overlap(&a, &b, m));
        prop_assert!(!a.overlaps(&b));
    }

    #[test]
    fn overlaps_past_margin_collide(size in 20u32..100, depth in 1u32..20) {
        let s = size as f32;
        let m = COLLISION_MARGIN;
        let a = Body::new(Vec2::ZERO, Vec2::splat(s));
        let b = Body::new(Vec2::new(s - 2.0 * m - depth as f32 * 0.5, 0.0), Vec2::splat(s));
        prop_assert!(a.overlaps(&b));
    }

    #[test]
    fn gauge_cycles_through_slots(count in 1usize..30) {
        let mut s = quiet_state(3);
        for n in 1..=count {
            let at = s.player.center() - Vec2::splat(PICKUP_SIZE / 2.0);
            s.pickups.push(Pickup::new(PickupKind::PowerUp, at));
            collision::resolve(&mut s);
            s.prune();
            prop_assert_eq!(s.run.gauge, (n - 1) % 6 + 1);
        }
        prop_assert_eq!(s.run.score, count as u64 * PICKUP_SCORE);
    }

    #[test]
    fn shield_absorbs_one_charge_per_shot(charges in 1u32..=10, shots in 1usize..4) {
        let mut s = quiet_state(4);
        s.player.shield = charges;
        for _ in 0..shots {
            let at = s.player.center();
            s.enemy_bullets.push(EnemyBullet::new(at, Vec2::ZERO, BulletTint::Orange));
            collision::resolve(&mut s);
            s.prune();
        }
        let absorbed = (shots as u32).min(charges);
        prop_assert_eq!(s.player.shield, charges - absorbed);
        prop_assert!(s.enemy_bullets.is_empty());
        let lost = shots as u32 - absorbed;
        prop_assert_eq!(s.run.lives, 3u32.saturating_sub(lost.min(1)));
    }

    #[test]
    fn respawn_grants_invincibility(follow_ups in 1usize..10) {
        let mut s = quiet_state(5);
        let at = s.player.center();
        s.enemy_bullets.push(EnemyBullet::new(at, Vec2::ZERO, BulletTint::Red));
        collision::resolve(&mut s);
        s.prune();
        prop_assert_eq!(s.run.lives, 2);
        prop_assert!(s.player.invincibility > 0.0);

        for _ in 0..follow_ups {
            let at = s.player.center();
            s.enemy_bullets.push(EnemyBullet::new(at, Vec2::ZERO, BulletTint::Red));
            collision::resolve(&mut s);
            s.prune();
        }
        prop_assert_eq!(s.run.lives, 2);
    }
}
