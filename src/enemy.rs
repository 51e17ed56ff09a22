//! Enemy ships.
//!
//! Every enemy shares the same base state (health, hitbox, hit flash, drop
//! roll); what differs per variant is movement and attack logic, carried in
//! [`EnemyKind`].  Projectiles an enemy fires are pushed into the shot sink
//! handed to [`Enemy::update`].

use std::f32::consts::TAU;

use log::{debug, info};
use rand::Rng;

use crate::config::DEFAULT_DROP_CHANCE;
use crate::entities::{Entity, Frame, Tint};
use crate::geometry::Vec2;
use crate::powerup::PowerUp;
use crate::projectile::Projectile;

/// Fraction of the sprite trimmed from each side of an enemy hitbox.
pub const ENEMY_HITBOX_INSET: f32 = 0.15;
/// Seconds an enemy stays tinted after taking damage.
pub const FLASH_DURATION: f32 = 0.1;
pub const ENEMY_BULLET_SIZE: Vec2 = Vec2::new(6.0, 6.0);

// ── Patrol shooter ────────────────────────────────────────────────────────────

pub const FIGHTER_NAME: &str = "Alien Fighter";
pub const FIGHTER_HEALTH: i32 = 80;
pub const FIGHTER_SPEED: f32 = 1.0;
pub const FIGHTER_SIZE: Vec2 = Vec2::new(48.0, 48.0);
pub const FIGHTER_FIRE_INTERVAL: f32 = 2.0;
const FIGHTER_BULLET_SPEED: f32 = 6.0;
const FIGHTER_BULLET_DAMAGE: i32 = 5;

// ── Weaver shooter ────────────────────────────────────────────────────────────

pub const SCOUT_NAME: &str = "Alien Scout";
pub const SCOUT_HEALTH: i32 = 50;
pub const SCOUT_SPEED: f32 = 1.0;
pub const SCOUT_SIZE: Vec2 = Vec2::new(40.0, 40.0);
pub const SCOUT_FIRE_INTERVAL: f32 = 3.0;
pub const SCOUT_FREQUENCY_RANGE: (f32, f32) = (1.0, 4.0);
pub const SCOUT_AMPLITUDE_RANGE: (f32, f32) = (1.0, 3.0);
const SCOUT_BULLET_SPEED: f32 = 5.0;
const SCOUT_BULLET_DAMAGE: i32 = 5;

// ── Boss ──────────────────────────────────────────────────────────────────────

pub const BOSS_NAME: &str = "Alien Dragon";
pub const BOSS_SIZE: Vec2 = Vec2::new(160.0, 120.0);
pub const BOSS_SPEED: f32 = 2.0;
pub const BOSS_DESCENT_RATE: f32 = 1.0;
pub const BOSS_HOVER_Y: f32 = 50.0;
pub const BOSS_ATTACK_INTERVAL: f32 = 2.0;
pub const BOSS_RING_SIZE: usize = 12;
pub const BOSS_ENRAGE_MULTIPLIER: f32 = 1.5;
const BOSS_BULLET_SPEED: f32 = 4.0;
const BOSS_AIMED_DAMAGE: i32 = 10;
const BOSS_RING_DAMAGE: i32 = 5;
const BOSS_START_PHASE: u8 = 3;

/// Health thresholds for the boss.  Phase advances and the special attack
/// are gated independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossTuning {
    pub max_health: i32,
    /// `phase_thresholds[0]` moves phase 3 to 2, `[1]` moves 2 to 1.
    pub phase_thresholds: [i32; 2],
    /// Below this health the attack cycle alternates ring and aimed shots.
    pub special_attack_below: i32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            max_health: 500,
            phase_thresholds: [350, 150],
            special_attack_below: 200,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossMovement {
    /// Sinking into view until it reaches the hover altitude.
    Descend,
    /// Bouncing between the screen edges.
    Patrol,
}

#[derive(Clone, Debug)]
pub struct BossState {
    movement: BossMovement,
    /// +1 moving right, -1 moving left.
    heading: f32,
    phase: u8,
    attack_timer: f32,
    special_next: bool,
    tuning: BossTuning,
}

impl BossState {
    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn movement(&self) -> BossMovement {
        self.movement
    }

    pub fn tuning(&self) -> &BossTuning {
        &self.tuning
    }

    fn attack_interval(&self) -> f32 {
        if self.phase < BOSS_START_PHASE {
            BOSS_ATTACK_INTERVAL / 2.0
        } else {
            BOSS_ATTACK_INTERVAL
        }
    }

    /// Health at or below which the current phase ends, if any phase remains.
    fn next_threshold(&self) -> Option<i32> {
        match self.phase {
            3 => Some(self.tuning.phase_thresholds[0]),
            2 => Some(self.tuning.phase_thresholds[1]),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub enum EnemyKind {
    PatrolShooter {
        fire_cooldown: f32,
    },
    WeaverShooter {
        frequency: f32,
        amplitude: f32,
        shoot_timer: f32,
    },
    Boss(BossState),
}

#[derive(Clone, Debug)]
pub struct Enemy {
    name: &'static str,
    position: Vec2,
    size: Vec2,
    health: i32,
    max_health: i32,
    speed: f32,
    flash_timer: f32,
    drop_chance: f64,
    active: bool,
    kind: EnemyKind,
}

impl Enemy {
    fn base(
        name: &'static str,
        health: i32,
        speed: f32,
        size: Vec2,
        position: Vec2,
        kind: EnemyKind,
    ) -> Self {
        Self {
            name,
            position,
            size,
            health,
            max_health: health,
            speed,
            flash_timer: 0.0,
            drop_chance: DEFAULT_DROP_CHANCE,
            active: true,
            kind,
        }
    }

    /// Straight-down fighter.  The first shot lands at a random point within
    /// one interval so a freshly spawned squad doesn't fire in lockstep.
    pub fn patrol_shooter(position: Vec2, rng: &mut impl Rng) -> Self {
        let fire_cooldown = rng.gen::<f32>() * FIGHTER_FIRE_INTERVAL;
        Self::base(
            FIGHTER_NAME,
            FIGHTER_HEALTH,
            FIGHTER_SPEED,
            FIGHTER_SIZE,
            position,
            EnemyKind::PatrolShooter { fire_cooldown },
        )
    }

    /// Sine-weaving scout with its own frequency, amplitude and fire phase.
    pub fn weaver_shooter(position: Vec2, rng: &mut impl Rng) -> Self {
        let (f_lo, f_hi) = SCOUT_FREQUENCY_RANGE;
        let (a_lo, a_hi) = SCOUT_AMPLITUDE_RANGE;
        let frequency = rng.gen_range(f_lo..=f_hi);
        let amplitude = rng.gen_range(a_lo..=a_hi);
        let shoot_timer = rng.gen::<f32>() * SCOUT_FIRE_INTERVAL;
        Self::base(
            SCOUT_NAME,
            SCOUT_HEALTH,
            SCOUT_SPEED,
            SCOUT_SIZE,
            position,
            EnemyKind::WeaverShooter {
                frequency,
                amplitude,
                shoot_timer,
            },
        )
    }

    pub fn boss(position: Vec2) -> Self {
        Self::boss_with(position, BossTuning::default())
    }

    pub fn boss_with(position: Vec2, tuning: BossTuning) -> Self {
        Self::base(
            BOSS_NAME,
            tuning.max_health,
            BOSS_SPEED,
            BOSS_SIZE,
            position,
            EnemyKind::Boss(BossState {
                movement: BossMovement::Descend,
                heading: 1.0,
                phase: BOSS_START_PHASE,
                attack_timer: 0.0,
                special_next: true,
                tuning,
            }),
        )
    }

    /// Override the probability of dropping a power-up on death.  A NaN
    /// chance falls back to the default.
    pub fn with_drop_chance(mut self, chance: f64) -> Self {
        self.drop_chance = if chance.is_nan() {
            DEFAULT_DROP_CHANCE
        } else {
            chance.clamp(0.0, 1.0)
        };
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn kind(&self) -> &EnemyKind {
        &self.kind
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EnemyKind::Boss(_))
    }

    /// Boss phase counter, `None` for regular enemies.
    pub fn phase(&self) -> Option<u8> {
        match &self.kind {
            EnemyKind::Boss(boss) => Some(boss.phase),
            _ => None,
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_timer > 0.0
    }

    pub fn tint(&self) -> Tint {
        if self.is_flashing() {
            Tint::Damaged
        } else {
            Tint::Normal
        }
    }

    // ── Per-tick update ───────────────────────────────────────────────────────

    /// Move, count down timers and fire.  `target` is the player's centre,
    /// used by the boss's aimed shot.
    pub fn update(&mut self, frame: &Frame, target: Vec2, shots: &mut Vec<Projectile>) {
        if !self.active {
            return;
        }

        if self.flash_timer > 0.0 {
            self.flash_timer -= frame.dt;
        }

        let max_x = (frame.width() - self.size.x).max(0.0);
        let center = self.center();
        let muzzle = Vec2::new(
            self.position.x + self.size.x / 2.0 - ENEMY_BULLET_SIZE.x / 2.0,
            self.position.y + self.size.y,
        );

        match &mut self.kind {
            EnemyKind::PatrolShooter { fire_cooldown } => {
                self.position.x = self.position.x.clamp(0.0, max_x);
                self.position.y += self.speed;

                *fire_cooldown -= frame.dt;
                if *fire_cooldown <= 0.0 {
                    *fire_cooldown = FIGHTER_FIRE_INTERVAL;
                    shots.push(Projectile::new(
                        muzzle,
                        ENEMY_BULLET_SIZE,
                        FIGHTER_BULLET_DAMAGE,
                        self.name,
                        Vec2::DOWN,
                        FIGHTER_BULLET_SPEED,
                    ));
                }
            }
            EnemyKind::WeaverShooter {
                frequency,
                amplitude,
                shoot_timer,
            } => {
                let offset = (frame.elapsed * *frequency).sin() * *amplitude;
                self.position.x = (self.position.x + offset).clamp(0.0, max_x);
                self.position.y += self.speed;

                *shoot_timer += frame.dt;
                if *shoot_timer >= SCOUT_FIRE_INTERVAL {
                    *shoot_timer = 0.0;
                    shots.push(Projectile::new(
                        muzzle,
                        ENEMY_BULLET_SIZE,
                        SCOUT_BULLET_DAMAGE,
                        self.name,
                        Vec2::DOWN,
                        SCOUT_BULLET_SPEED,
                    ));
                }
            }
            EnemyKind::Boss(boss) => {
                match boss.movement {
                    BossMovement::Descend => {
                        self.position.y += BOSS_DESCENT_RATE;
                        if self.position.y >= BOSS_HOVER_Y {
                            self.position.y = BOSS_HOVER_Y;
                            boss.movement = BossMovement::Patrol;
                            debug!("{} reached hover altitude", self.name);
                        }
                    }
                    BossMovement::Patrol => {
                        self.position.x += boss.heading * self.speed;
                        if self.position.x <= 0.0 {
                            self.position.x = 0.0;
                            boss.heading = 1.0;
                        } else if self.position.x >= max_x {
                            self.position.x = max_x;
                            boss.heading = -1.0;
                        }
                    }
                }

                boss.attack_timer += frame.dt;
                if boss.attack_timer >= boss.attack_interval() {
                    boss.attack_timer = 0.0;
                    let special = self.health < boss.tuning.special_attack_below && boss.special_next;
                    if self.health < boss.tuning.special_attack_below {
                        boss.special_next = !boss.special_next;
                    }
                    if special {
                        ring_attack(center, self.name, shots);
                    } else {
                        aimed_attack(center, target, self.name, shots);
                    }
                }
            }
        }

        if self.position.y > frame.height() {
            self.active = false;
        }
    }

    // ── Damage ────────────────────────────────────────────────────────────────

    /// Apply `amount` damage and start the hit flash.  On death the enemy
    /// deactivates and may return a power-up to spawn where it died.
    pub fn take_damage(&mut self, amount: i32, rng: &mut impl Rng) -> Option<PowerUp> {
        if !self.active {
            return None;
        }
        self.health -= amount.max(0);
        self.flash_timer = FLASH_DURATION;

        if let EnemyKind::Boss(boss) = &mut self.kind {
            while let Some(threshold) = boss.next_threshold() {
                if self.health > threshold {
                    break;
                }
                boss.phase -= 1;
                self.speed *= BOSS_ENRAGE_MULTIPLIER;
                info!("{} is enraged! phase {} speed {:.2}", self.name, boss.phase, self.speed);
            }
        }

        if self.health <= 0 {
            self.active = false;
            debug!("{} destroyed", self.name);
            if rng.gen_bool(self.drop_chance) {
                return Some(PowerUp::random_drop(self.position, rng));
            }
        }
        None
    }
}

fn aimed_attack(from: Vec2, target: Vec2, owner: &'static str, shots: &mut Vec<Projectile>) {
    let spawn = from - ENEMY_BULLET_SIZE * 0.5;
    shots.push(Projectile::new(
        spawn,
        ENEMY_BULLET_SIZE,
        BOSS_AIMED_DAMAGE,
        owner,
        target - from,
        BOSS_BULLET_SPEED,
    ));
}

fn ring_attack(from: Vec2, owner: &'static str, shots: &mut Vec<Projectile>) {
    let spawn = from - ENEMY_BULLET_SIZE * 0.5;
    let step = TAU / BOSS_RING_SIZE as f32;
    for i in 0..BOSS_RING_SIZE {
        shots.push(Projectile::new(
            spawn,
            ENEMY_BULLET_SIZE,
            BOSS_RING_DAMAGE,
            owner,
            Vec2::from_angle(step * i as f32),
            BOSS_BULLET_SPEED,
        ));
    }
    debug!("{} fired a ring of {}", owner, BOSS_RING_SIZE);
}

impl Entity for Enemy {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn hitbox_inset(&self) -> f32 {
        ENEMY_HITBOX_INSET
    }
}
