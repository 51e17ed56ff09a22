//! Falling pickups dropped by destroyed enemies.

use log::debug;
use rand::Rng;

use crate::entities::{Entity, Frame, PowerUpKind, Tint};
use crate::geometry::Vec2;
use crate::player::Player;

pub const POWER_UP_SIZE: Vec2 = Vec2::new(24.0, 24.0);
/// Pixels per tick.
pub const POWER_UP_FALL_SPEED: f32 = 2.0;
pub const HEALTH_RESTORE: i32 = 50;
pub const WEAPON_LEVELS: u32 = 1;

#[derive(Clone, Debug)]
pub struct PowerUp {
    position: Vec2,
    kind: PowerUpKind,
    magnitude: i32,
    speed: f32,
    active: bool,
}

impl PowerUp {
    pub fn new(position: Vec2, kind: PowerUpKind, magnitude: i32) -> Self {
        Self {
            position,
            kind,
            magnitude,
            speed: POWER_UP_FALL_SPEED,
            active: true,
        }
    }

    /// A drop of uniformly random kind with that kind's standard magnitude.
    pub fn random_drop(position: Vec2, rng: &mut impl Rng) -> Self {
        let kind = match rng.gen_range(0..3) {
            0 => PowerUpKind::Health,
            1 => PowerUpKind::Shield,
            _ => PowerUpKind::WeaponUpgrade,
        };
        let magnitude = match kind {
            PowerUpKind::Health => HEALTH_RESTORE,
            PowerUpKind::WeaponUpgrade => WEAPON_LEVELS as i32,
            PowerUpKind::Shield => 1,
        };
        debug!("power-up {:?} dropped at ({:.0}, {:.0})", kind, position.x, position.y);
        Self::new(position, kind, magnitude)
    }

    pub fn kind(&self) -> PowerUpKind {
        self.kind
    }

    pub fn magnitude(&self) -> i32 {
        self.magnitude
    }

    pub fn tint(&self) -> Tint {
        match self.kind {
            PowerUpKind::Health => Tint::Health,
            PowerUpKind::Shield => Tint::Shield,
            PowerUpKind::WeaponUpgrade => Tint::Weapon,
        }
    }

    /// Fall one tick; a pickup that leaves the bottom of the screen is lost.
    pub fn update(&mut self, frame: &Frame) {
        if !self.active {
            return;
        }
        self.position.y += self.speed;
        if self.position.y > frame.height() {
            self.active = false;
        }
    }

    /// Apply the effect to `player` and deactivate.  Returns false (and does
    /// nothing) if the pickup was already consumed or the player is dead.
    pub fn apply(&mut self, player: &mut Player) -> bool {
        if !self.active || player.is_dead() {
            return false;
        }
        match self.kind {
            PowerUpKind::Health => player.add_health(self.magnitude),
            PowerUpKind::Shield => player.activate_shield(),
            PowerUpKind::WeaponUpgrade => player.upgrade_weapon(self.magnitude.max(0) as u32),
        }
        self.active = false;
        true
    }
}

impl Entity for PowerUp {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn size(&self) -> Vec2 {
        POWER_UP_SIZE
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
