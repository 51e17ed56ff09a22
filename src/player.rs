//! The human-controlled ship.
//!
//! Per-tick order inside [`Player::update`] is fixed: fire cooldown,
//! invincibility/flicker, movement, reload.  Shooting is a separate call so
//! the orchestrator can decide when it happens.

use log::debug;

use crate::config::GameConfig;
use crate::entities::{Entity, Frame, InputSnapshot, Tint};
use crate::geometry::Vec2;
use crate::projectile::Projectile;

pub const PLAYER_SIZE: Vec2 = Vec2::new(64.0, 64.0);
pub const PLAYER_BULLET_SIZE: Vec2 = Vec2::new(8.0, 16.0);
/// Damage per weapon level.
pub const BASE_DAMAGE: i32 = 10;
/// Distance below the top edge of the sprite where shots appear.
const NOSE_OFFSET: f32 = 8.0;
/// Distance between the bottom of the screen and the ship's top edge at spawn.
const SPAWN_ROW_FROM_BOTTOM: f32 = 100.0;
/// Blink rate of the red hurt tint, in half-periods per second.
const HURT_BLINK_RATE: f32 = 20.0;

#[derive(Clone, Debug)]
pub struct Player {
    name: String,
    position: Vec2,
    health: i32,
    speed: f32,

    // Weapon
    fire_rate: f32,
    shoot_cooldown: f32,
    projectile_speed: f32,
    weapon_level: u32,
    ammo: u32,
    max_ammo: u32,

    // Invincibility & shield
    invincible: bool,
    invincibility_timer: f32,
    invincibility_duration: f32,
    flicker_timer: f32,
    flicker_interval: f32,
    visible: bool,
    hurt_tint: bool,
    shield: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, position: Vec2, config: &GameConfig) -> Self {
        Self {
            name: name.into(),
            position,
            health: config.player_health,
            speed: config.player_speed,
            fire_rate: config.fire_rate,
            shoot_cooldown: 0.0,
            projectile_speed: config.projectile_speed,
            weapon_level: 1,
            ammo: config.max_ammo,
            max_ammo: config.max_ammo,
            invincible: false,
            invincibility_timer: 0.0,
            invincibility_duration: config.invincibility,
            flicker_timer: 0.0,
            flicker_interval: config.flicker_interval,
            visible: true,
            hurt_tint: false,
            shield: false,
        }
    }

    /// A fresh ship centred horizontally near the bottom of the screen.
    pub fn spawn(config: &GameConfig) -> Self {
        let start = Vec2::new(
            config.screen_width / 2.0 - PLAYER_SIZE.x / 2.0,
            config.screen_height - SPAWN_ROW_FROM_BOTTOM,
        );
        Self::new(config.player_name.clone(), start, config)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn weapon_level(&self) -> u32 {
        self.weapon_level
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn max_ammo(&self) -> u32 {
        self.max_ammo
    }

    pub fn has_shield(&self) -> bool {
        self.shield
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn tint(&self) -> Tint {
        if self.hurt_tint {
            Tint::Damaged
        } else if self.shield {
            Tint::Shielded
        } else {
            Tint::Normal
        }
    }

    pub fn projectile_damage(&self) -> i32 {
        BASE_DAMAGE * self.weapon_level as i32
    }

    // ── Per-tick update ───────────────────────────────────────────────────────

    /// Advance timers, move, and handle reload.  Returns true when a reload
    /// actually refilled the magazine.
    pub fn update(&mut self, input: &InputSnapshot, frame: &Frame) -> bool {
        let dt = frame.dt;

        if self.shoot_cooldown > 0.0 {
            self.shoot_cooldown -= dt;
        }

        if self.invincible {
            self.invincibility_timer -= dt;
            self.flicker_timer -= dt;

            if self.flicker_timer <= 0.0 {
                self.visible = !self.visible;
                self.flicker_timer = self.flicker_interval;
            }

            if self.invincibility_timer <= 0.0 {
                self.invincible = false;
                self.visible = true;
                self.hurt_tint = false;
            } else {
                self.hurt_tint = (self.invincibility_timer * HURT_BLINK_RATE) % 2.0 > 1.0;
            }
        }

        self.position.x += input.horizontal() * self.speed;
        self.position.x = self
            .position
            .x
            .clamp(0.0, (frame.width() - PLAYER_SIZE.x).max(0.0));
        self.position.y = self
            .position
            .y
            .clamp(0.0, (frame.height() - PLAYER_SIZE.y).max(0.0));

        if input.reload && self.ammo < self.max_ammo {
            self.ammo = self.max_ammo;
            debug!("{} reloaded ({} rounds)", self.name, self.ammo);
            return true;
        }
        false
    }

    // ── Weapon ────────────────────────────────────────────────────────────────

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown <= 0.0 && self.ammo > 0
    }

    /// Fire one round straight up from the nose.  Returns `None` and leaves
    /// the ship untouched when the cooldown is running or the magazine is
    /// empty.
    pub fn shoot(&mut self) -> Option<Projectile> {
        if !self.can_shoot() {
            return None;
        }
        self.ammo -= 1;
        self.shoot_cooldown = self.fire_rate;

        let spawn = Vec2::new(
            self.position.x + PLAYER_SIZE.x / 2.0 - PLAYER_BULLET_SIZE.x / 2.0,
            self.position.y + NOSE_OFFSET,
        );
        Some(Projectile::new(
            spawn,
            PLAYER_BULLET_SIZE,
            self.projectile_damage(),
            self.name.clone(),
            Vec2::UP,
            self.projectile_speed,
        ))
    }

    // ── Damage & pickups ──────────────────────────────────────────────────────

    /// Apply a hit.  A shield absorbs the whole hit and is consumed; during
    /// invincibility the hit is ignored.  Returns true if health was lost.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.shield {
            self.shield = false;
            debug!("{}'s shield absorbed {} damage", self.name, amount);
            return false;
        }
        if self.invincible {
            return false;
        }

        self.health -= amount;
        self.invincible = true;
        self.invincibility_timer = self.invincibility_duration;
        self.flicker_timer = self.flicker_interval;
        debug!("{} took {} damage, health {}", self.name, amount, self.health);
        true
    }

    /// Restore health.  A dead ship stays dead.
    pub fn add_health(&mut self, amount: i32) {
        if self.is_dead() {
            return;
        }
        self.health += amount.max(0);
    }

    pub fn activate_shield(&mut self) {
        self.shield = true;
    }

    pub fn upgrade_weapon(&mut self, levels: u32) {
        self.weapon_level += levels;
    }
}

impl Entity for Player {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn size(&self) -> Vec2 {
        PLAYER_SIZE
    }

    fn is_active(&self) -> bool {
        !self.is_dead()
    }
}
