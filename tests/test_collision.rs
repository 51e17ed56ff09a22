use space_shooter::collision::*;
use space_shooter::config::GameConfig;
use space_shooter::enemy::Enemy;
use space_shooter::entities::{Entity, PowerUpKind};
use space_shooter::geometry::Vec2;
use space_shooter::player::Player;
use space_shooter::powerup::PowerUp;
use space_shooter::projectile::Projectile;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn resolver() -> CollisionResolver {
    CollisionResolver::from_config(&GameConfig::default())
}

/// Player at (368, 500), 64×64.
fn make_player() -> Player {
    Player::spawn(&GameConfig::default())
}

fn bullet_at(position: Vec2, damage: i32, direction: Vec2) -> Projectile {
    Projectile::new(position, Vec2::new(6.0, 6.0), damage, "tester", direction, 5.0)
}

// ── Body contact grace ────────────────────────────────────────────────────────

#[test]
fn no_contact_damage_during_grace() {
    let mut rng = seeded_rng();
    let mut player = make_player();
    let mut enemies = vec![Enemy::boss(Vec2::new(330.0, 480.0)).with_drop_chance(0.0)];

    let report = resolver().resolve(
        &mut player,
        &mut enemies,
        &mut Vec::new(),
        &mut Vec::new(),
        0.5,
        &mut rng,
    );
    assert_eq!(report.contacts, 0);
    assert_eq!(player.health(), 100);
    assert_eq!(enemies[0].health(), 500);
}

#[test]
fn contact_damage_after_grace() {
    let mut rng = seeded_rng();
    let mut player = make_player();
    let mut enemies = vec![Enemy::boss(Vec2::new(330.0, 480.0)).with_drop_chance(0.0)];

    let report = resolver().resolve(
        &mut player,
        &mut enemies,
        &mut Vec::new(),
        &mut Vec::new(),
        1.5,
        &mut rng,
    );
    assert_eq!(report.contacts, 1);
    assert_eq!(player.health(), 90);
    assert_eq!(enemies[0].health(), 400);
}

// ── Player shots ──────────────────────────────────────────────────────────────

#[test]
fn player_shot_damages_enemy_and_is_removed() {
    let mut rng = seeded_rng();
    let mut player = make_player();
    let mut enemies = vec![Enemy::weaver_shooter(Vec2::new(100.0, 100.0), &mut rng)];
    let mut shots = vec![bullet_at(Vec2::new(117.0, 117.0), 10, Vec2::UP)];

    let report = resolver().resolve(
        &mut player,
        &mut enemies,
        &mut shots,
        &mut Vec::new(),
        0.0,
        &mut rng,
    );
    assert_eq!(report.impacts, 1);
    assert_eq!(enemies[0].health(), 40);
    assert!(shots.is_empty());
}

#[test]
fn shot_grazing_the_sprite_edge_misses_the_hitbox() {
    let mut rng = seeded_rng();
    let mut enemies = vec![Enemy::weaver_shooter(Vec2::new(100.0, 100.0), &mut rng)];
    // Overlaps the 40×40 sprite but not the inset 28×28 hitbox.
    let mut shots = vec![Projectile::new(
        Vec2::new(100.0, 100.0),
        Vec2::new(4.0, 4.0),
        10,
        "tester",
        Vec2::UP,
        5.0,
    )];
    let mut report = CollisionReport::default();
    resolver().player_shots_vs_enemies(&mut shots, &mut enemies, &mut report, &mut rng);
    assert_eq!(report.impacts, 0);
    assert_eq!(enemies[0].health(), 50);
    assert!(shots[0].is_active());
}

#[test]
fn multi_hit_damages_every_overlapping_enemy() {
    let mut rng = seeded_rng();
    let mut enemies = vec![
        Enemy::weaver_shooter(Vec2::new(100.0, 100.0), &mut rng),
        Enemy::weaver_shooter(Vec2::new(100.0, 100.0), &mut rng),
    ];
    let mut shots = vec![bullet_at(Vec2::new(117.0, 117.0), 10, Vec2::UP)];
    let mut report = CollisionReport::default();
    resolver().player_shots_vs_enemies(&mut shots, &mut enemies, &mut report, &mut rng);
    assert_eq!(report.impacts, 2);
    assert_eq!(enemies[0].health(), 40);
    assert_eq!(enemies[1].health(), 40);
}

#[test]
fn single_hit_stops_at_first_enemy() {
    let mut rng = seeded_rng();
    let mut enemies = vec![
        Enemy::weaver_shooter(Vec2::new(100.0, 100.0), &mut rng),
        Enemy::weaver_shooter(Vec2::new(100.0, 100.0), &mut rng),
    ];
    let mut shots = vec![bullet_at(Vec2::new(117.0, 117.0), 10, Vec2::UP)];
    let single = CollisionResolver {
        multi_hit: false,
        ..resolver()
    };
    let mut report = CollisionReport::default();
    single.player_shots_vs_enemies(&mut shots, &mut enemies, &mut report, &mut rng);
    assert_eq!(report.impacts, 1);
    assert_eq!(enemies[0].health(), 40);
    assert_eq!(enemies[1].health(), 50);
}

#[test]
fn kill_with_certain_drop_reports_power_up() {
    let mut rng = seeded_rng();
    let mut player = make_player();
    let mut enemies =
        vec![Enemy::weaver_shooter(Vec2::new(100.0, 100.0), &mut rng).with_drop_chance(1.0)];
    let mut shots = vec![bullet_at(Vec2::new(117.0, 117.0), 50, Vec2::UP)];

    let report = resolver().resolve(
        &mut player,
        &mut enemies,
        &mut shots,
        &mut Vec::new(),
        0.0,
        &mut rng,
    );
    assert!(!enemies[0].is_active());
    assert_eq!(report.drops.len(), 1);
}

// ── Enemy shots ───────────────────────────────────────────────────────────────

#[test]
fn enemy_shot_hurts_player_once() {
    let mut rng = seeded_rng();
    let mut player = make_player();
    let mut enemy_shots = vec![
        bullet_at(Vec2::new(400.0, 520.0), 5, Vec2::DOWN),
        bullet_at(Vec2::new(380.0, 540.0), 5, Vec2::DOWN),
    ];

    let report = resolver().resolve(
        &mut player,
        &mut [],
        &mut Vec::new(),
        &mut enemy_shots,
        0.0,
        &mut rng,
    );
    // Second bullet lands during invincibility but is still consumed.
    assert_eq!(report.player_hits, 2);
    assert_eq!(player.health(), 95);
    assert!(enemy_shots.is_empty());
}

#[test]
fn distant_enemy_shot_is_kept() {
    let mut rng = seeded_rng();
    let mut player = make_player();
    let mut enemy_shots = vec![bullet_at(Vec2::new(10.0, 10.0), 5, Vec2::DOWN)];
    resolver().resolve(
        &mut player,
        &mut [],
        &mut Vec::new(),
        &mut enemy_shots,
        0.0,
        &mut rng,
    );
    assert_eq!(enemy_shots.len(), 1);
    assert_eq!(player.health(), 100);
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[test]
fn touching_power_up_is_collected_once() {
    let mut player = make_player();
    let mut power_ups = vec![
        PowerUp::new(Vec2::new(390.0, 520.0), PowerUpKind::Health, 50),
        PowerUp::new(Vec2::new(10.0, 10.0), PowerUpKind::Shield, 1),
    ];
    assert_eq!(collect_power_ups(&mut power_ups, &mut player), 1);
    assert_eq!(player.health(), 150);
    assert!(!power_ups[0].is_active());
    assert!(power_ups[1].is_active());

    assert_eq!(collect_power_ups(&mut power_ups, &mut player), 0);
    assert_eq!(player.health(), 150);
}

#[test]
fn dead_player_collects_nothing() {
    let mut player = make_player();
    player.take_damage(100);
    let mut power_ups = vec![PowerUp::new(Vec2::new(390.0, 520.0), PowerUpKind::Health, 50)];
    assert_eq!(collect_power_ups(&mut power_ups, &mut player), 0);
    assert_eq!(player.health(), 0);
    assert!(power_ups[0].is_active());
}

#[test]
fn weapon_and_shield_pickups_apply() {
    let mut player = make_player();
    let mut power_ups = vec![
        PowerUp::new(Vec2::new(390.0, 520.0), PowerUpKind::WeaponUpgrade, 1),
        PowerUp::new(Vec2::new(380.0, 510.0), PowerUpKind::Shield, 1),
    ];
    assert_eq!(collect_power_ups(&mut power_ups, &mut player), 2);
    assert_eq!(player.weapon_level(), 2);
    assert!(player.has_shield());
}
