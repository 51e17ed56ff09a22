//! Types shared by every part of the simulation: the entity capability
//! trait, per-frame input and timing, and the small enums the presentation
//! layer reads.

use crate::geometry::{Rect, Vec2};

// ── Entity contract ───────────────────────────────────────────────────────────

/// Capability set shared by the player, enemies, projectiles and power-ups.
///
/// `active` only ever goes from `true` to `false`.  An inactive entity is
/// never drawn, never collided against, and is dropped at the next
/// compaction point.
pub trait Entity {
    fn position(&self) -> Vec2;
    fn size(&self) -> Vec2;
    fn is_active(&self) -> bool;

    /// Fraction of the size trimmed from each side of the hitbox.
    fn hitbox_inset(&self) -> f32 {
        0.0
    }

    fn bounding_box(&self) -> Rect {
        Rect::from_pos_size(self.position(), self.size()).inset(self.hitbox_inset())
    }

    fn center(&self) -> Vec2 {
        Rect::from_pos_size(self.position(), self.size()).center()
    }
}

/// Keep only the active entities, in order.  This is the single place
/// entities leave a registry; nothing is removed while a pass iterates.
pub fn compact<E: Entity>(registry: &mut Vec<E>) {
    registry.retain(|e| e.is_active());
}

// ── Per-frame host data ───────────────────────────────────────────────────────

/// Derived boolean input signals for one frame.  `confirm` is the raw
/// "held" state; the state machine turns it into an edge itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub reload: bool,
    pub confirm: bool,
}

impl InputSnapshot {
    /// True only on the frame `confirm` goes from released to pressed.
    pub fn confirm_pressed(&self, previous: &InputSnapshot) -> bool {
        self.confirm && !previous.confirm
    }

    /// Horizontal impulse: -1, 0 or +1.  Right wins when both are held.
    pub fn horizontal(&self) -> f32 {
        if self.move_right {
            1.0
        } else if self.move_left {
            -1.0
        } else {
            0.0
        }
    }
}

/// Timing and screen geometry for the tick being simulated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Seconds since the previous tick.
    pub dt: f32,
    /// Seconds since the game started.
    pub elapsed: f32,
    pub screen: Rect,
}

impl Frame {
    pub fn new(dt: f32, elapsed: f32, width: f32, height: f32) -> Self {
        Self {
            dt,
            elapsed,
            screen: Rect::new(0.0, 0.0, width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.screen.w
    }

    pub fn height(&self) -> f32 {
        self.screen.h
    }
}

// ── Shared enums ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    MainMenu,
    Playing,
    GameOver,
    Victory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    Health,
    Shield,
    WeaponUpgrade,
}

/// Colour modulation the presentation layer applies to a sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Normal,
    /// Hit flash on enemies, hurt blink on the player.
    Damaged,
    Shielded,
    Health,
    Weapon,
    Shield,
}
