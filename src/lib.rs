//! Aether Onslaught - a wave shooter against descending alien formations.
//!
//! Core modules:
//! - `entities`: pure data for the player, projectiles, enemies and explosions
//! - `formation`: per-level enemy spawning and the shared wall-bounce rule
//! - `behavior`: per-frame enemy movement, dives and bomb drops
//! - `collision`: hit tests, damage and scoring
//! - `session`: the per-tick state machine tying everything together
//!
//! Collaborators around the core: `snapshot` (render view), `audio`,
//! `highscores` (top-5 persistence), `config` and `error`.

pub mod audio;
pub mod behavior;
pub mod collision;
pub mod config;
pub mod entities;
pub mod error;
pub mod formation;
pub mod highscores;
pub mod session;
pub mod snapshot;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use entities::GameState;
pub use session::{init_state, tick, GameEvent, TickInput};

/// Sprite geometry and scoring constants
pub mod consts {
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Normal, bomber and elite enemies share one sprite size
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 30.0;

    pub const MEGA_WIDTH: f32 = 200.0;
    pub const MEGA_HEIGHT: f32 = 150.0;
    pub const MEGA_HEALTH: u32 = 20;

    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    pub const BOMB_WIDTH: f32 = 5.0;
    pub const BOMB_HEIGHT: f32 = 15.0;

    pub const EXPLOSION_WIDTH: f32 = 40.0;
    pub const EXPLOSION_HEIGHT: f32 = 40.0;

    /// Formation grid layout
    pub const GRID_ORIGIN_X: f32 = 75.0;
    pub const GRID_ORIGIN_Y: f32 = 50.0;
    pub const GRID_GUTTER: f32 = 20.0;
    pub const GRID_COLUMNS: usize = 10;
    pub const BASE_ROWS: usize = 3;
    pub const MAX_ROWS: usize = 5;

    /// Top row turns to bombers / elites from these levels on
    pub const BOMBER_ROW_LEVEL: u32 = 4;
    pub const ELITE_ROW_LEVEL: u32 = 7;

    pub const SCORE_NORMAL: u32 = 10;
    pub const SCORE_BOMBER: u32 = 10;
    pub const SCORE_ELITE: u32 = 20;
    pub const SCORE_MEGA: u32 = 100;

    /// Lives shown on the HUD and the ceiling for `GameConfig::starting_lives`
    pub const MAX_LIVES: u32 = 3;
}
