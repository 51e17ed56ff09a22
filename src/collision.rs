//! Per-tick collision resolution.
//!
//! Three independent AABB passes run after all motion for the tick:
//! player shots against enemies, enemy shots against the player, and enemy
//! bodies against the player (suppressed during the post-load grace
//! period).  Passes only mark entities inactive; the registries are
//! compacted once at the end so nothing is removed mid-iteration.

use log::debug;
use rand::Rng;

use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::entities::{compact, Entity};
use crate::player::Player;
use crate::powerup::PowerUp;
use crate::projectile::Projectile;

/// What happened during one resolution, for sound cues and tests.
#[derive(Debug, Default)]
pub struct CollisionReport {
    /// Player projectile hits on enemies.
    pub impacts: u32,
    /// Enemy projectile hits on the player.
    pub player_hits: u32,
    /// Enemy body contacts with the player.
    pub contacts: u32,
    /// Power-ups released by enemies destroyed this tick.
    pub drops: Vec<PowerUp>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionResolver {
    pub contact_grace: f32,
    pub contact_damage: i32,
    pub counter_damage: i32,
    /// A player shot overlapping several enemies damages all of them when
    /// set, or only the first in roster order when clear.
    pub multi_hit: bool,
}

impl CollisionResolver {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            contact_grace: config.contact_grace,
            contact_damage: config.contact_damage,
            counter_damage: config.counter_damage,
            multi_hit: config.multi_hit,
        }
    }

    /// Run all three passes, then drop spent projectiles from both
    /// registries.  `since_wave_start` gates the body-contact pass.
    pub fn resolve(
        &self,
        player: &mut Player,
        enemies: &mut [Enemy],
        player_shots: &mut Vec<Projectile>,
        enemy_shots: &mut Vec<Projectile>,
        since_wave_start: f32,
        rng: &mut impl Rng,
    ) -> CollisionReport {
        let mut report = CollisionReport::default();

        self.player_shots_vs_enemies(player_shots, enemies, &mut report, rng);
        self.enemy_shots_vs_player(enemy_shots, player, &mut report);
        if since_wave_start > self.contact_grace {
            self.bodies_vs_player(enemies, player, &mut report, rng);
        }

        compact(player_shots);
        compact(enemy_shots);
        report
    }

    // ── 1. Player shots ↔ enemies ─────────────────────────────────────────────

    pub fn player_shots_vs_enemies(
        &self,
        shots: &mut [Projectile],
        enemies: &mut [Enemy],
        report: &mut CollisionReport,
        rng: &mut impl Rng,
    ) {
        for shot in shots.iter_mut() {
            if !shot.is_active() {
                continue;
            }
            let shot_box = shot.bounding_box();

            for enemy in enemies.iter_mut() {
                if !enemy.is_active() || !shot_box.intersects(&enemy.bounding_box()) {
                    continue;
                }
                shot.on_hit();
                report.impacts += 1;
                if let Some(drop) = enemy.take_damage(shot.damage(), rng) {
                    report.drops.push(drop);
                }
                if !self.multi_hit {
                    break;
                }
            }
        }
    }

    // ── 2. Enemy shots ↔ player ───────────────────────────────────────────────

    pub fn enemy_shots_vs_player(
        &self,
        shots: &mut [Projectile],
        player: &mut Player,
        report: &mut CollisionReport,
    ) {
        let player_box = player.bounding_box();
        for shot in shots.iter_mut() {
            if !shot.is_active() || !shot.bounding_box().intersects(&player_box) {
                continue;
            }
            player.take_damage(shot.damage());
            shot.on_hit();
            report.player_hits += 1;
            debug!("{} hit by {}", player.name(), shot.owner());
        }
    }

    // ── 3. Enemy bodies ↔ player ──────────────────────────────────────────────

    pub fn bodies_vs_player(
        &self,
        enemies: &mut [Enemy],
        player: &mut Player,
        report: &mut CollisionReport,
        rng: &mut impl Rng,
    ) {
        let player_box = player.bounding_box();
        for enemy in enemies.iter_mut() {
            if !enemy.is_active() || !enemy.bounding_box().intersects(&player_box) {
                continue;
            }
            player.take_damage(self.contact_damage);
            if let Some(drop) = enemy.take_damage(self.counter_damage, rng) {
                report.drops.push(drop);
            }
            report.contacts += 1;
            debug!("{} rammed {}", enemy.name(), player.name());
        }
    }
}

// ── Pickups ───────────────────────────────────────────────────────────────────

/// Apply every active power-up touching the player.  Returns how many were
/// collected; a dead player collects nothing.
pub fn collect_power_ups(power_ups: &mut [PowerUp], player: &mut Player) -> u32 {
    let player_box = player.bounding_box();
    let mut collected = 0;
    for power_up in power_ups.iter_mut() {
        if power_up.is_active()
            && power_up.bounding_box().intersects(&player_box)
            && power_up.apply(player)
        {
            debug!("{} collected {:?}", player.name(), power_up.kind());
            collected += 1;
        }
    }
    collected
}
