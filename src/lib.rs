//! Combat simulation core for a vertically-scrolling arcade shooter.
//!
//! The library owns every piece of game logic: entity lifecycles, enemy
//! behaviour, wave progression, collision resolution, the top-level state
//! machine and the music crossfade scheduler.  Rendering, input polling and
//! audio playback belong to the host (see `src/main.rs`), which feeds an
//! [`entities::InputSnapshot`] into [`compute::Game::tick`] once per frame and
//! draws a [`snapshot::Snapshot`] built from the result.

pub mod audio;
pub mod collision;
pub mod compute;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod geometry;
pub mod level;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod snapshot;
