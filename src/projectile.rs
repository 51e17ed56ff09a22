//! Straight-line projectiles fired by the player and by enemies.

use crate::entities::{Entity, Frame};
use crate::geometry::Vec2;

#[derive(Clone, Debug)]
pub struct Projectile {
    position: Vec2,
    size: Vec2,
    damage: i32,
    /// Name of the firing entity, kept for attribution only.
    owner: String,
    direction: Vec2,
    speed: f32,
    active: bool,
}

impl Projectile {
    /// `direction` is normalised here; a zero direction stays zero and the
    /// projectile never moves.
    pub fn new(
        position: Vec2,
        size: Vec2,
        damage: i32,
        owner: impl Into<String>,
        direction: Vec2,
        speed: f32,
    ) -> Self {
        Self {
            position,
            size,
            damage,
            owner: owner.into(),
            direction: direction.normalize_or_zero(),
            speed,
            active: true,
        }
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Advance one tick and deactivate once the projectile leaves the
    /// playfield: above `-height`, below the screen, or fully past either
    /// side.
    pub fn update(&mut self, frame: &Frame) {
        if !self.active {
            return;
        }
        self.position += self.direction * self.speed;

        let off_vertical = self.position.y < -self.size.y || self.position.y > frame.height();
        let off_horizontal = self.position.x < -self.size.x || self.position.x > frame.width();
        if off_vertical || off_horizontal {
            self.active = false;
        }
    }

    /// Called by the collision resolver on impact.  Idempotent.
    pub fn on_hit(&mut self) {
        self.active = false;
    }
}

impl Entity for Projectile {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
