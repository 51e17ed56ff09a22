//! Read-only view of a [`Game`] for the presentation layer.
//!
//! Building a snapshot copies out everything the renderer needs, so drawing
//! never holds a borrow on the simulation.

use crate::compute::Game;
use crate::entities::{Entity, GameState, Tint};
use crate::enemy::EnemyKind;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Fighter,
    Scout,
    Boss,
    PlayerShot,
    EnemyShot,
    PowerUp,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
    pub tint: Tint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossBar {
    pub health: i32,
    pub max_health: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub health: i32,
    pub wave: u32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub out_of_ammo: bool,
    pub shield: bool,
    pub weapon_level: u32,
    pub boss: Option<BossBar>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub state: GameState,
    pub screen: Rect,
    /// Back-to-front draw list; empty outside `Playing`.
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
}

pub fn build_snapshot(game: &Game) -> Snapshot {
    let player = game.player();
    let level = game.level();
    let mut sprites = Vec::new();

    if game.state() == GameState::Playing {
        for enemy in level.enemies().iter().filter(|e| e.is_active()) {
            let kind = match enemy.kind() {
                EnemyKind::PatrolShooter { .. } => SpriteKind::Fighter,
                EnemyKind::WeaverShooter { .. } => SpriteKind::Scout,
                EnemyKind::Boss(_) => SpriteKind::Boss,
            };
            sprites.push(Sprite {
                kind,
                rect: Rect::from_pos_size(enemy.position(), enemy.size()),
                tint: enemy.tint(),
            });
        }
        for power_up in game.power_ups().iter().filter(|p| p.is_active()) {
            sprites.push(Sprite {
                kind: SpriteKind::PowerUp,
                rect: Rect::from_pos_size(power_up.position(), power_up.size()),
                tint: power_up.tint(),
            });
        }
        for shot in game.player_shots().iter().filter(|p| p.is_active()) {
            sprites.push(Sprite {
                kind: SpriteKind::PlayerShot,
                rect: Rect::from_pos_size(shot.position(), shot.size()),
                tint: Tint::Normal,
            });
        }
        for shot in game.enemy_shots().iter().filter(|p| p.is_active()) {
            sprites.push(Sprite {
                kind: SpriteKind::EnemyShot,
                rect: Rect::from_pos_size(shot.position(), shot.size()),
                tint: Tint::Normal,
            });
        }
        if player.is_visible() {
            sprites.push(Sprite {
                kind: SpriteKind::Player,
                rect: Rect::from_pos_size(player.position(), player.size()),
                tint: player.tint(),
            });
        }
    }

    let boss = level.boss().map(|b| BossBar {
        health: b.health().max(0),
        max_health: b.max_health(),
    });

    Snapshot {
        state: game.state(),
        screen: game.screen(),
        sprites,
        hud: Hud {
            health: player.health(),
            wave: level.wave(),
            ammo: player.ammo(),
            max_ammo: player.max_ammo(),
            out_of_ammo: player.ammo() == 0,
            shield: player.has_shield(),
            weapon_level: player.weapon_level(),
            boss,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::entities::InputSnapshot;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn menu_snapshot_has_no_sprites() {
        let game = Game::new(GameConfig::default(), &mut StdRng::seed_from_u64(1));
        let snap = build_snapshot(&game);
        assert_eq!(snap.state, GameState::MainMenu);
        assert!(snap.sprites.is_empty());
        assert_eq!(snap.hud.wave, 1);
        assert_eq!(snap.hud.ammo, 30);
    }

    #[test]
    fn playing_snapshot_draws_player_last() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = Game::new(GameConfig::default(), &mut rng);
        let confirm = InputSnapshot {
            confirm: true,
            ..Default::default()
        };
        game.tick(&confirm, 1.0 / 60.0, &mut rng);
        let snap = build_snapshot(&game);
        assert_eq!(snap.state, GameState::Playing);
        assert_eq!(snap.sprites.last().map(|s| s.kind), Some(SpriteKind::Player));
        // Wave 1 is six scouts.
        let scouts = snap.sprites.iter().filter(|s| s.kind == SpriteKind::Scout).count();
        assert_eq!(scouts, 6);
        assert!(snap.hud.boss.is_none());
    }
}
