//! Wave loading and progression.
//!
//! The director owns the live enemies of the current wave.  Rosters are built
//! from a fixed per-wave table; only horizontal placement and per-enemy
//! behaviour parameters come from the injected RNG.

use log::{info, warn};
use rand::Rng;

use crate::config::GameConfig;
use crate::enemy::{Enemy, BOSS_SIZE};
use crate::entities::{Entity, Frame};
use crate::geometry::Vec2;
use crate::projectile::Projectile;

/// Horizontal distance from either screen edge that spawns stay clear of.
pub const SPAWN_MARGIN: f32 = 50.0;
/// Topmost spawn row; later enemies queue further above it.
pub const FIRST_SPAWN_Y: f32 = -100.0;
pub const BOSS_SPAWN_Y: f32 = -200.0;

// ── Wave table ───────────────────────────────────────────────────────────────

/// Enemy count and vertical spacing for a regular wave.  Waves past the
/// third repeat its dense layout.
fn wave_layout(wave: u32) -> Option<(usize, f32)> {
    match wave {
        0 => None,
        1 => Some((6, 150.0)),
        2 => Some((10, 120.0)),
        _ => Some((15, 100.0)),
    }
}

/// Whether slot `i` of `wave` is a weaving scout (otherwise a fighter).
fn is_scout_slot(wave: u32, i: usize) -> bool {
    match wave {
        1 => true,
        2 => i % 2 == 1,
        _ => i % 3 == 0,
    }
}

fn spawn_x(width: f32, rng: &mut impl Rng) -> f32 {
    let hi = width - SPAWN_MARGIN;
    if hi <= SPAWN_MARGIN {
        return width / 2.0;
    }
    rng.gen_range(SPAWN_MARGIN..hi)
}

/// Build the roster for `wave` on a screen `width` pixels wide.  The
/// `final_wave` is the boss alone; wave 0 yields an empty roster.
pub fn build_roster(wave: u32, final_wave: u32, width: f32, rng: &mut impl Rng) -> Vec<Enemy> {
    if wave > 0 && wave == final_wave {
        let x = width / 2.0 - BOSS_SIZE.x / 2.0;
        return vec![Enemy::boss(Vec2::new(x, BOSS_SPAWN_Y))];
    }

    let Some((count, spacing)) = wave_layout(wave) else {
        warn!("no roster defined for wave {}", wave);
        return Vec::new();
    };

    (0..count)
        .map(|i| {
            let pos = Vec2::new(spawn_x(width, rng), FIRST_SPAWN_Y - i as f32 * spacing);
            if is_scout_slot(wave, i) {
                Enemy::weaver_shooter(pos, rng)
            } else {
                Enemy::patrol_shooter(pos, rng)
            }
        })
        .collect()
}

// ── Director ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct LevelDirector {
    wave: u32,
    enemies: Vec<Enemy>,
    has_spawned: bool,
    settle_delay: f32,
    since_load: f32,
    drop_chance: f64,
    final_wave: u32,
}

impl LevelDirector {
    pub fn new(settle_delay: f32, drop_chance: f64, final_wave: u32) -> Self {
        Self {
            wave: 0,
            enemies: Vec::new(),
            has_spawned: false,
            settle_delay,
            since_load: 0.0,
            drop_chance,
            final_wave,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.settle_delay, config.drop_chance, config.final_wave)
    }

    /// Replace the current wave with `wave`'s roster and restart the settle
    /// timer.
    pub fn load(&mut self, wave: u32, width: f32, rng: &mut impl Rng) {
        self.enemies.clear();
        self.has_spawned = false;
        self.since_load = 0.0;
        self.wave = wave;

        for enemy in build_roster(wave, self.final_wave, width, rng) {
            self.add_enemy(enemy);
        }
        info!("wave {} loaded with {} enemies", wave, self.enemies.len());
    }

    /// Register an enemy with the current wave.
    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy.with_drop_chance(self.drop_chance));
        self.has_spawned = true;
    }

    /// Advance the settle timer, then every enemy once it has elapsed, and
    /// drop the enemies that are no longer active.
    pub fn update(&mut self, frame: &Frame, target: Vec2, shots: &mut Vec<Projectile>) {
        self.since_load += frame.dt;

        if !self.is_settling() {
            for enemy in self.enemies.iter_mut() {
                enemy.update(frame, target, shots);
            }
        }

        self.retain_active();
    }

    pub fn retain_active(&mut self) {
        self.enemies.retain(|e| e.is_active());
    }

    /// Enemies are frozen until the settle delay has passed.
    pub fn is_settling(&self) -> bool {
        self.since_load < self.settle_delay
    }

    /// A wave is complete once it has had enemies and all of them are gone.
    pub fn is_complete(&self) -> bool {
        self.has_spawned && self.enemies.is_empty()
    }

    pub fn has_spawned(&self) -> bool {
        self.has_spawned
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn final_wave(&self) -> u32 {
        self.final_wave
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn boss(&self) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.is_boss() && e.is_active())
    }
}
