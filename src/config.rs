//! Game tuning loaded from an INI file.
//!
//! Every value has a safe default, so a missing or partial file still yields
//! a playable game.
//!
//! ```ini
//! [screen]
//! width = 800
//! height = 600
//!
//! [player]
//! name = Player
//! health = 100
//! speed = 4.0
//! fire_rate = 0.25
//! max_ammo = 30
//! projectile_speed = 10.0
//! invincibility = 1.0
//! flicker_interval = 0.1
//!
//! [combat]
//! contact_grace = 1.0
//! contact_damage = 10
//! counter_damage = 100
//! drop_chance = 0.1
//! multi_hit = true
//!
//! [waves]
//! settle_delay = 1.0
//! final_wave = 4
//!
//! [audio]
//! fade_speed = 1.0
//! max_volume = 0.3
//!
//! [host]
//! target_fps = 30
//! ```

use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

pub const DEFAULT_SCREEN_WIDTH: f32 = 800.0;
pub const DEFAULT_SCREEN_HEIGHT: f32 = 600.0;

pub const DEFAULT_PLAYER_NAME: &str = "Player";
pub const DEFAULT_PLAYER_HEALTH: i32 = 100;
pub const DEFAULT_PLAYER_SPEED: f32 = 4.0;
pub const DEFAULT_FIRE_RATE: f32 = 0.25;
pub const DEFAULT_MAX_AMMO: u32 = 30;
pub const DEFAULT_PROJECTILE_SPEED: f32 = 10.0;
pub const DEFAULT_INVINCIBILITY: f32 = 1.0;
pub const DEFAULT_FLICKER_INTERVAL: f32 = 0.1;

pub const DEFAULT_CONTACT_GRACE: f32 = 1.0;
pub const DEFAULT_CONTACT_DAMAGE: i32 = 10;
pub const DEFAULT_COUNTER_DAMAGE: i32 = 100;
pub const DEFAULT_DROP_CHANCE: f64 = 0.1;
pub const DEFAULT_MULTI_HIT: bool = true;

pub const DEFAULT_SETTLE_DELAY: f32 = 1.0;
pub const DEFAULT_FINAL_WAVE: u32 = 4;

pub const DEFAULT_FADE_SPEED: f32 = 1.0;
pub const DEFAULT_MAX_VOLUME: f32 = 0.3;

pub const DEFAULT_TARGET_FPS: u32 = 30;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,

    pub player_name: String,
    pub player_health: i32,
    /// Pixels per tick.
    pub player_speed: f32,
    /// Seconds between shots.
    pub fire_rate: f32,
    pub max_ammo: u32,
    pub projectile_speed: f32,
    /// Seconds of damage immunity after a hit.
    pub invincibility: f32,
    pub flicker_interval: f32,

    /// Seconds after a wave loads before enemy bodies can hurt the player.
    pub contact_grace: f32,
    pub contact_damage: i32,
    pub counter_damage: i32,
    /// Probability that a destroyed enemy drops a power-up.
    pub drop_chance: f64,
    /// When true, a player projectile overlapping several enemies in the
    /// same tick damages all of them; when false only the first one.
    pub multi_hit: bool,

    /// Seconds enemies stay frozen after a wave loads.
    pub settle_delay: f32,
    /// Number of the last wave; clearing it wins the game.
    pub final_wave: u32,

    /// Volume units per second.
    pub fade_speed: f32,
    pub max_volume: f32,

    pub target_fps: u32,
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            player_health: DEFAULT_PLAYER_HEALTH,
            player_speed: DEFAULT_PLAYER_SPEED,
            fire_rate: DEFAULT_FIRE_RATE,
            max_ammo: DEFAULT_MAX_AMMO,
            projectile_speed: DEFAULT_PROJECTILE_SPEED,
            invincibility: DEFAULT_INVINCIBILITY,
            flicker_interval: DEFAULT_FLICKER_INTERVAL,
            contact_grace: DEFAULT_CONTACT_GRACE,
            contact_damage: DEFAULT_CONTACT_DAMAGE,
            counter_damage: DEFAULT_COUNTER_DAMAGE,
            drop_chance: DEFAULT_DROP_CHANCE,
            multi_hit: DEFAULT_MULTI_HIT,
            settle_delay: DEFAULT_SETTLE_DELAY,
            final_wave: DEFAULT_FINAL_WAVE,
            fade_speed: DEFAULT_FADE_SPEED,
            max_volume: DEFAULT_MAX_VOLUME,
            target_fps: DEFAULT_TARGET_FPS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load values from `config_path`.  Keys that are missing or fail to
    /// parse keep their current value.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|e| format!("Failed to load config file {:?}: {}", self.config_path, e))?;

        // [screen]
        if let Some(v) = ini.getuint("screen", "width").ok().flatten() {
            self.screen_width = v as f32;
        }
        if let Some(v) = ini.getuint("screen", "height").ok().flatten() {
            self.screen_height = v as f32;
        }

        // [player]
        if let Some(v) = ini.get("player", "name") {
            self.player_name = v;
        }
        if let Some(v) = ini.getint("player", "health").ok().flatten() {
            self.player_health = v as i32;
        }
        if let Some(v) = ini.getfloat("player", "speed").ok().flatten() {
            self.player_speed = v as f32;
        }
        if let Some(v) = ini.getfloat("player", "fire_rate").ok().flatten() {
            self.fire_rate = v as f32;
        }
        if let Some(v) = ini.getuint("player", "max_ammo").ok().flatten() {
            self.max_ammo = v as u32;
        }
        if let Some(v) = ini.getfloat("player", "projectile_speed").ok().flatten() {
            self.projectile_speed = v as f32;
        }
        if let Some(v) = ini.getfloat("player", "invincibility").ok().flatten() {
            self.invincibility = v as f32;
        }
        if let Some(v) = ini.getfloat("player", "flicker_interval").ok().flatten() {
            self.flicker_interval = v as f32;
        }

        // [combat]
        if let Some(v) = ini.getfloat("combat", "contact_grace").ok().flatten() {
            self.contact_grace = v as f32;
        }
        if let Some(v) = ini.getint("combat", "contact_damage").ok().flatten() {
            self.contact_damage = v as i32;
        }
        if let Some(v) = ini.getint("combat", "counter_damage").ok().flatten() {
            self.counter_damage = v as i32;
        }
        if let Some(v) = ini.getfloat("combat", "drop_chance").ok().flatten() {
            if v.is_finite() {
                self.drop_chance = v.clamp(0.0, 1.0);
            } else {
                warn!("Ignoring non-finite drop_chance {}", v);
            }
        }
        if let Some(v) = ini.getbool("combat", "multi_hit").ok().flatten() {
            self.multi_hit = v;
        }

        // [waves]
        if let Some(v) = ini.getfloat("waves", "settle_delay").ok().flatten() {
            self.settle_delay = v as f32;
        }
        if let Some(v) = ini.getuint("waves", "final_wave").ok().flatten() {
            self.final_wave = (v as u32).max(1);
        }

        // [audio]
        if let Some(v) = ini.getfloat("audio", "fade_speed").ok().flatten() {
            self.fade_speed = v as f32;
        }
        if let Some(v) = ini.getfloat("audio", "max_volume").ok().flatten() {
            self.max_volume = v as f32;
        }

        // [host]
        if let Some(v) = ini.getuint("host", "target_fps").ok().flatten() {
            self.target_fps = (v as u32).max(1);
        }

        info!(
            "Loaded config: screen {}x{}, player hp={} ammo={}, final wave={}, multi_hit={}",
            self.screen_width,
            self.screen_height,
            self.player_health,
            self.max_ammo,
            self.final_wave,
            self.multi_hit
        );

        Ok(())
    }

    /// Write the current values to `config_path`, creating the file if needed.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut ini = Ini::new();

        ini.set("screen", "width", Some((self.screen_width as u32).to_string()));
        ini.set("screen", "height", Some((self.screen_height as u32).to_string()));

        ini.set("player", "name", Some(self.player_name.clone()));
        ini.set("player", "health", Some(self.player_health.to_string()));
        ini.set("player", "speed", Some(self.player_speed.to_string()));
        ini.set("player", "fire_rate", Some(self.fire_rate.to_string()));
        ini.set("player", "max_ammo", Some(self.max_ammo.to_string()));
        ini.set("player", "projectile_speed", Some(self.projectile_speed.to_string()));
        ini.set("player", "invincibility", Some(self.invincibility.to_string()));
        ini.set("player", "flicker_interval", Some(self.flicker_interval.to_string()));

        ini.set("combat", "contact_grace", Some(self.contact_grace.to_string()));
        ini.set("combat", "contact_damage", Some(self.contact_damage.to_string()));
        ini.set("combat", "counter_damage", Some(self.counter_damage.to_string()));
        ini.set("combat", "drop_chance", Some(self.drop_chance.to_string()));
        ini.set("combat", "multi_hit", Some(self.multi_hit.to_string()));

        ini.set("waves", "settle_delay", Some(self.settle_delay.to_string()));
        ini.set("waves", "final_wave", Some(self.final_wave.to_string()));

        ini.set("audio", "fade_speed", Some(self.fade_speed.to_string()));
        ini.set("audio", "max_volume", Some(self.max_volume.to_string()));

        ini.set("host", "target_fps", Some(self.target_fps.to_string()));

        ini.write(&self.config_path)
            .map_err(|e| format!("Failed to save config file {:?}: {}", self.config_path, e))?;

        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }
}
