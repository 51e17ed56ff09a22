use space_shooter::enemy::*;
use space_shooter::entities::{Entity, Frame, Tint};
use space_shooter::geometry::Vec2;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn frame(dt: f32) -> Frame {
    Frame::new(dt, 0.0, 800.0, 600.0)
}

fn scout(rng: &mut StdRng) -> Enemy {
    Enemy::weaver_shooter(Vec2::new(100.0, 100.0), rng).with_drop_chance(0.0)
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn scout_survives_five_small_hits() {
    let mut rng = seeded_rng();
    let mut e = scout(&mut rng);
    assert_eq!(e.health(), 50);
    for _ in 0..5 {
        assert!(e.take_damage(5, &mut rng).is_none());
    }
    assert_eq!(e.health(), 25);
    assert!(e.is_active());

    e.take_damage(25, &mut rng);
    assert!(e.health() <= 0);
    assert!(!e.is_active());
}

#[test]
fn dead_enemy_ignores_further_damage() {
    let mut rng = seeded_rng();
    let mut e = scout(&mut rng);
    e.take_damage(60, &mut rng);
    let health = e.health();
    assert!(e.take_damage(10, &mut rng).is_none());
    assert_eq!(e.health(), health);
    assert!(!e.is_active());
}

#[test]
fn certain_drop_spawns_where_enemy_died() {
    let mut rng = seeded_rng();
    let mut e = Enemy::patrol_shooter(Vec2::new(200.0, 150.0), &mut rng).with_drop_chance(1.0);
    let drop = e.take_damage(1000, &mut rng).expect("drop chance 1.0 always drops");
    assert_eq!(drop.position(), Vec2::new(200.0, 150.0));
    assert!(drop.is_active());
}

#[test]
fn odd_drop_chances_are_tamed() {
    let mut rng = seeded_rng();
    let mut never =
        Enemy::patrol_shooter(Vec2::new(200.0, 150.0), &mut rng).with_drop_chance(f64::NEG_INFINITY);
    assert!(never.take_damage(1000, &mut rng).is_none());

    let mut always =
        Enemy::patrol_shooter(Vec2::new(200.0, 150.0), &mut rng).with_drop_chance(f64::INFINITY);
    assert!(always.take_damage(1000, &mut rng).is_some());

    let mut nan =
        Enemy::patrol_shooter(Vec2::new(200.0, 150.0), &mut rng).with_drop_chance(f64::NAN);
    nan.take_damage(1000, &mut rng);
    assert!(!nan.is_active());
}

#[test]
fn hit_flash_fades() {
    let mut rng = seeded_rng();
    let mut e = scout(&mut rng);
    e.take_damage(5, &mut rng);
    assert!(e.is_flashing());
    assert_eq!(e.tint(), Tint::Damaged);

    let mut shots = Vec::new();
    e.update(&frame(0.1), Vec2::ZERO, &mut shots);
    assert!(!e.is_flashing());
    assert_eq!(e.tint(), Tint::Normal);
}

#[test]
fn hitbox_is_inset() {
    let mut rng = seeded_rng();
    let e = scout(&mut rng);
    let hb = e.bounding_box();
    assert!((hb.x - 106.0).abs() < 1e-3);
    assert!((hb.y - 106.0).abs() < 1e-3);
    assert!((hb.w - 28.0).abs() < 1e-3);
    assert!((hb.h - 28.0).abs() < 1e-3);
}

// ── Movement & fire ───────────────────────────────────────────────────────────

#[test]
fn fighter_sinks_and_fires_down() {
    let mut rng = seeded_rng();
    let mut e = Enemy::patrol_shooter(Vec2::new(200.0, 100.0), &mut rng);
    let mut shots = Vec::new();
    e.update(&frame(FIGHTER_FIRE_INTERVAL), Vec2::ZERO, &mut shots);

    assert_eq!(e.position(), Vec2::new(200.0, 101.0));
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].direction(), Vec2::DOWN);
    assert_eq!(shots[0].owner(), FIGHTER_NAME);
    assert_eq!(shots[0].damage(), 5);
}

#[test]
fn scout_fires_on_its_interval() {
    let mut rng = seeded_rng();
    let mut e = scout(&mut rng);
    let mut shots = Vec::new();
    e.update(&frame(SCOUT_FIRE_INTERVAL), Vec2::ZERO, &mut shots);
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].owner(), SCOUT_NAME);
    assert_eq!(e.position().y, 101.0);
}

#[test]
fn enemy_below_the_screen_deactivates() {
    let mut rng = seeded_rng();
    let mut e = Enemy::patrol_shooter(Vec2::new(200.0, 600.0), &mut rng);
    let mut shots = Vec::new();
    e.update(&frame(0.01), Vec2::ZERO, &mut shots);
    assert!(!e.is_active());
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[test]
fn boss_descends_then_patrols() {
    let mut boss = Enemy::boss(Vec2::new(300.0, 49.0));
    let mut shots = Vec::new();
    boss.update(&frame(0.01), Vec2::ZERO, &mut shots);
    assert_eq!(boss.position().y, BOSS_HOVER_Y);

    boss.update(&frame(0.01), Vec2::ZERO, &mut shots);
    assert_eq!(boss.position(), Vec2::new(302.0, BOSS_HOVER_Y));
    match boss.kind() {
        EnemyKind::Boss(state) => assert_eq!(state.movement(), BossMovement::Patrol),
        _ => panic!("expected boss"),
    }
}

#[test]
fn boss_phase_advances_once_per_threshold() {
    let mut rng = seeded_rng();
    let mut boss = Enemy::boss(Vec2::new(300.0, 50.0)).with_drop_chance(0.0);
    assert_eq!(boss.phase(), Some(3));

    boss.take_damage(150, &mut rng); // 350
    assert_eq!(boss.phase(), Some(2));
    assert_eq!(boss.speed(), 3.0);

    boss.take_damage(10, &mut rng); // 340, same side of the next threshold
    assert_eq!(boss.phase(), Some(2));
    assert_eq!(boss.speed(), 3.0);

    boss.take_damage(190, &mut rng); // 150
    assert_eq!(boss.phase(), Some(1));
    assert_eq!(boss.speed(), 4.5);

    boss.take_damage(100, &mut rng); // 50
    assert_eq!(boss.phase(), Some(1));
}

#[test]
fn one_big_hit_crosses_both_thresholds() {
    let mut rng = seeded_rng();
    let mut boss = Enemy::boss(Vec2::new(300.0, 50.0)).with_drop_chance(0.0);
    boss.take_damage(400, &mut rng); // 100
    assert_eq!(boss.phase(), Some(1));
    assert!(boss.is_active());
}

#[test]
fn boss_attacks_aimed_then_alternates_with_ring() {
    let mut rng = seeded_rng();
    let mut boss = Enemy::boss(Vec2::new(300.0, 50.0)).with_drop_chance(0.0);
    let below = Vec2::new(380.0, 550.0);
    let mut shots = Vec::new();

    boss.update(&frame(BOSS_ATTACK_INTERVAL), below, &mut shots);
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].damage(), 10);
    assert!(shots[0].direction().y > 0.0);

    boss.take_damage(310, &mut rng); // 190: phase 2, special attacks unlocked
    assert_eq!(boss.phase(), Some(2));

    shots.clear();
    boss.update(&frame(BOSS_ATTACK_INTERVAL / 2.0), below, &mut shots);
    assert_eq!(shots.len(), BOSS_RING_SIZE);
    assert!(shots.iter().all(|s| s.damage() == 5));

    shots.clear();
    boss.update(&frame(BOSS_ATTACK_INTERVAL / 2.0), below, &mut shots);
    assert_eq!(shots.len(), 1);
}

#[test]
fn ring_shots_all_leave_the_screen() {
    let tuning = BossTuning {
        special_attack_below: 10_000,
        ..BossTuning::default()
    };
    let mut boss = Enemy::boss_with(Vec2::new(300.0, 50.0), tuning);
    let mut shots = Vec::new();
    boss.update(&frame(BOSS_ATTACK_INTERVAL), Vec2::new(380.0, 550.0), &mut shots);
    assert_eq!(shots.len(), BOSS_RING_SIZE);

    let f = frame(1.0 / 60.0);
    for _ in 0..1000 {
        for shot in shots.iter_mut() {
            shot.update(&f);
        }
    }
    assert!(shots.iter().all(|s| !s.is_active()));
}

#[test]
fn regular_enemies_have_no_phase() {
    let mut rng = seeded_rng();
    assert_eq!(scout(&mut rng).phase(), None);
    assert!(!scout(&mut rng).is_boss());
}
