//! Top-level game state machine and per-tick orchestration.
//!
//! [`Game::tick`] is called once per rendered frame with the frame's input
//! and elapsed time.  All randomness comes through the `rng` argument so
//! callers control determinism (tests pass a seeded RNG).
//!
//! Within a `Playing` tick the order is fixed: player, director and
//! enemies, projectiles and pickups, collision resolution, compaction,
//! then the termination checks.

use log::{debug, info, warn};
use rand::Rng;

use crate::audio::{AudioCmd, CrossfadeScheduler, SoundEffect, TrackId};
use crate::collision::{collect_power_ups, CollisionResolver};
use crate::config::GameConfig;
use crate::entities::{compact, Entity, Frame, GameState, InputSnapshot};
use crate::geometry::Rect;
use crate::level::LevelDirector;
use crate::player::Player;
use crate::powerup::PowerUp;
use crate::projectile::Projectile;

fn track_for_wave(wave: u32) -> TrackId {
    TrackId(wave.saturating_sub(1) as usize)
}

pub struct Game {
    config: GameConfig,
    state: GameState,
    screen: Rect,

    player: Player,
    level: LevelDirector,
    collisions: CollisionResolver,
    player_shots: Vec<Projectile>,
    enemy_shots: Vec<Projectile>,
    power_ups: Vec<PowerUp>,

    music: CrossfadeScheduler,
    audio: Vec<AudioCmd>,

    previous_input: InputSnapshot,
    /// Seconds since the game was created.
    elapsed: f32,
    /// Seconds of `Playing` time since the current wave loaded.
    since_wave_start: f32,
    frame: u64,
}

impl Game {
    /// A new game sitting on the main menu with wave 1 already loaded.
    pub fn new(config: GameConfig, rng: &mut impl Rng) -> Self {
        let screen = Rect::new(0.0, 0.0, config.screen_width, config.screen_height);
        let mut game = Self {
            state: GameState::MainMenu,
            screen,
            player: Player::spawn(&config),
            level: LevelDirector::from_config(&config),
            collisions: CollisionResolver::from_config(&config),
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            power_ups: Vec::new(),
            music: CrossfadeScheduler::new(config.fade_speed, config.max_volume),
            audio: Vec::new(),
            previous_input: InputSnapshot::default(),
            elapsed: 0.0,
            since_wave_start: 0.0,
            frame: 0,
            config,
        };
        game.reset_world(rng);
        game
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn level(&self) -> &LevelDirector {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut LevelDirector {
        &mut self.level
    }

    pub fn player_shots(&self) -> &[Projectile] {
        &self.player_shots
    }

    pub fn enemy_shots(&self) -> &[Projectile] {
        &self.enemy_shots
    }

    /// Queue an enemy projectile as if an enemy had fired it.
    pub fn add_enemy_shot(&mut self, shot: Projectile) {
        self.enemy_shots.push(shot);
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn add_power_up(&mut self, power_up: PowerUp) {
        self.power_ups.push(power_up);
    }

    pub fn music(&self) -> &CrossfadeScheduler {
        &self.music
    }

    pub fn since_wave_start(&self) -> f32 {
        self.since_wave_start
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Take every audio directive queued since the last call.
    pub fn drain_audio(&mut self) -> Vec<AudioCmd> {
        std::mem::take(&mut self.audio)
    }

    /// Follow a change of the host's screen size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.screen = Rect::new(0.0, 0.0, width, height);
        self.config.screen_width = width;
        self.config.screen_height = height;
    }

    // ── Per-frame tick ────────────────────────────────────────────────────────

    pub fn tick(&mut self, input: &InputSnapshot, dt: f32, rng: &mut impl Rng) {
        self.frame += 1;
        self.elapsed += dt;
        let confirm = input.confirm_pressed(&self.previous_input);
        self.previous_input = *input;

        self.music.update(dt, &mut self.audio);

        match self.state {
            GameState::MainMenu => {
                if confirm {
                    self.audio.push(AudioCmd::PlayFx(SoundEffect::Select));
                    self.state = GameState::Playing;
                    self.music.play(track_for_wave(self.level.wave()), &mut self.audio);
                    info!("game started at wave {}", self.level.wave());
                }
            }
            GameState::GameOver | GameState::Victory => {
                if confirm {
                    self.reset_world(rng);
                    self.state = GameState::MainMenu;
                    info!("back to main menu");
                }
            }
            GameState::Playing => self.tick_playing(input, dt, rng),
        }
    }

    fn tick_playing(&mut self, input: &InputSnapshot, dt: f32, rng: &mut impl Rng) {
        let frame = Frame {
            dt,
            elapsed: self.elapsed,
            screen: self.screen,
        };
        self.since_wave_start += dt;

        // ── 1. Player ────────────────────────────────────────────────────────
        if self.player.update(input, &frame) {
            self.audio.push(AudioCmd::PlayFx(SoundEffect::Reload));
        }
        if input.fire {
            if let Some(shot) = self.player.shoot() {
                self.player_shots.push(shot);
                self.audio.push(AudioCmd::PlayFx(SoundEffect::Shoot));
            }
        }

        // ── 2. Director & enemies ────────────────────────────────────────────
        let target = self.player.center();
        self.level.update(&frame, target, &mut self.enemy_shots);

        // ── 3. Projectiles & pickups ─────────────────────────────────────────
        for shot in self.player_shots.iter_mut() {
            shot.update(&frame);
        }
        for shot in self.enemy_shots.iter_mut() {
            shot.update(&frame);
        }
        for power_up in self.power_ups.iter_mut() {
            power_up.update(&frame);
        }

        // ── 4. Collisions ────────────────────────────────────────────────────
        let report = self.collisions.resolve(
            &mut self.player,
            self.level.enemies_mut(),
            &mut self.player_shots,
            &mut self.enemy_shots,
            self.since_wave_start,
            rng,
        );
        for _ in 0..report.impacts {
            self.audio.push(AudioCmd::PlayFx(SoundEffect::Impact));
        }
        for _ in 0..report.player_hits {
            self.audio.push(AudioCmd::PlayFx(SoundEffect::Hurt));
        }
        self.power_ups.extend(report.drops);
        // A ship destroyed this tick can no longer pick anything up.
        if !self.player.is_dead() {
            collect_power_ups(&mut self.power_ups, &mut self.player);
        }

        // ── 5. Compaction ────────────────────────────────────────────────────
        compact(&mut self.power_ups);
        self.level.retain_active();

        // ── 6. Termination ───────────────────────────────────────────────────
        if self.player.is_dead() {
            self.state = GameState::GameOver;
            self.music.silence();
            info!("game over at wave {}", self.level.wave());
        } else if self.level.is_complete() {
            self.advance_wave(rng);
        }
    }

    // ── Waves & reset ─────────────────────────────────────────────────────────

    /// Move to the next wave that has enemies, or to `Victory` once past the
    /// final wave.
    fn advance_wave(&mut self, rng: &mut impl Rng) {
        loop {
            let next = self.level.wave() + 1;
            if next > self.config.final_wave {
                self.state = GameState::Victory;
                self.music.silence();
                info!("victory after wave {}", self.level.wave());
                return;
            }

            self.load_wave(next, rng);
            if self.level.has_spawned() {
                self.music.play(track_for_wave(next), &mut self.audio);
                return;
            }
            warn!("wave {} has no enemies, skipping", next);
        }
    }

    fn load_wave(&mut self, wave: u32, rng: &mut impl Rng) {
        self.level.load(wave, self.screen.w, rng);
        self.since_wave_start = 0.0;
    }

    /// Fresh player, wave 1 loaded, every registry emptied.
    fn reset_world(&mut self, rng: &mut impl Rng) {
        self.player = Player::spawn(&self.config);
        self.level = LevelDirector::from_config(&self.config);
        self.player_shots.clear();
        self.enemy_shots.clear();
        self.power_ups.clear();
        self.load_wave(1, rng);
        debug!("world reset");
    }
}
