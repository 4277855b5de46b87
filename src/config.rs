//! Canvas and tuning configuration
//!
//! Defaults give the standard 800×600 game. A JSON file can override any
//! subset of fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "AETHER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Canvas ===
    pub width: f32,
    pub height: f32,
    /// Target ticks per second
    pub frame_rate: u32,

    // === Player ===
    pub starting_lives: u32,
    pub player_speed: f32,
    pub bullet_speed: f32,
    /// Ticks a player or kill explosion stays on screen
    pub explosion_duration: u32,

    // === Formation ===
    pub base_enemy_speed: f32,
    /// Added to the starting formation speed per level
    pub level_speed_increment: f32,
    /// Added to the formation speed on every wall bounce
    pub bounce_speed_increase: f32,
    /// How far the formation steps down on a wall bounce
    pub row_step: f32,
    /// Non-diving enemies below `height - bottom_margin` hit the player
    pub bottom_margin: f32,

    // === Enemy attacks ===
    pub bomb_speed: f32,
    pub bomb_drop_chance: f64,
    pub dive_chance: f64,
    pub dive_speed: f32,

    // === Boss ===
    pub boss_level: u32,
    pub mega_bomb_chance: f64,
    /// Per-tick advance of the mega's sine clock
    pub mega_time_step: f32,
    pub mega_amplitude: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            frame_rate: 60,

            starting_lives: 3,
            player_speed: 10.0,
            bullet_speed: 7.0,
            explosion_duration: 30,

            base_enemy_speed: 2.0,
            level_speed_increment: 0.1,
            bounce_speed_increase: 0.2,
            row_step: 20.0,
            bottom_margin: 100.0,

            bomb_speed: 5.0,
            bomb_drop_chance: 0.0025,
            dive_chance: 0.000625,
            dive_speed: 5.0,

            boss_level: 10,
            mega_bomb_chance: 0.01,
            mega_time_step: 0.05,
            mega_amplitude: 350.0,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON text and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the file named by `AETHER_CONFIG`, or fall back to defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Formation horizontal speed at the start of `level`
    pub fn level_start_speed(&self, level: u32) -> f32 {
        self.base_enemy_speed + level.saturating_sub(1) as f32 * self.level_speed_increment
    }

    pub fn is_boss_level(&self, level: u32) -> bool {
        level == self.boss_level
    }

    /// Player spawn position
    pub fn player_spawn(&self) -> (f32, f32) {
        (
            (self.width / 2.0).floor() - (PLAYER_WIDTH / 2.0).floor(),
            self.height - 100.0,
        )
    }

    pub fn validate(&self) -> Result<()> {
        let grid_width = GRID_ORIGIN_X + GRID_COLUMNS as f32 * (ENEMY_WIDTH + GRID_GUTTER);
        if !(self.width >= grid_width && self.width >= MEGA_WIDTH) {
            return Err(GameError::Config(format!(
                "canvas width {} cannot hold the formation grid ({grid_width})",
                self.width
            )));
        }
        if !(self.height > self.bottom_margin + PLAYER_HEIGHT && self.height >= MEGA_HEIGHT) {
            return Err(GameError::Config(format!(
                "canvas height {} is too small",
                self.height
            )));
        }
        if !(1..=MAX_LIVES).contains(&self.starting_lives) {
            return Err(GameError::Config(format!(
                "starting_lives must be within 1..={MAX_LIVES}, got {}",
                self.starting_lives
            )));
        }
        for (name, p) in [
            ("bomb_drop_chance", self.bomb_drop_chance),
            ("dive_chance", self.dive_chance),
            ("mega_bomb_chance", self.mega_bomb_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GameError::Config(format!("{name} must be within [0, 1], got {p}")));
            }
        }
        for (name, v) in [
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("bomb_speed", self.bomb_speed),
            ("dive_speed", self.dive_speed),
            ("base_enemy_speed", self.base_enemy_speed),
            ("mega_time_step", self.mega_time_step),
        ] {
            if !(v > 0.0) {
                return Err(GameError::Config(format!("{name} must be positive, got {v}")));
            }
        }
        for (name, v) in [
            ("level_speed_increment", self.level_speed_increment),
            ("bounce_speed_increase", self.bounce_speed_increase),
            ("row_step", self.row_step),
            ("bottom_margin", self.bottom_margin),
        ] {
            if !(v >= 0.0) {
                return Err(GameError::Config(format!("{name} must not be negative, got {v}")));
            }
        }
        if self.explosion_duration == 0 || self.frame_rate == 0 {
            return Err(GameError::Config(
                "explosion_duration and frame_rate must be non-zero".to_string(),
            ));
        }
        if self.boss_level == 0 {
            return Err(GameError::Config("boss_level must be at least 1".to_string()));
        }
        Ok(())
    }
}
