//! All game entity types — pure data, no logic.
//!
//! Coordinates are continuous logical-canvas units with the origin at the
//! top-left; every position is the sprite's top-left corner.

use crate::config::GameConfig;
use crate::consts::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Normal,
    Bomber,
    Elite,
    Mega,
}

/// Overall phase of a run, as seen by the orchestrator after each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    PlayerExploding,
    /// The tick that produced this status cleared a level and spawned the next
    LevelClear,
    /// Terminal: further ticks are no-ops
    GameOver,
}

// ── Projectiles & effects ─────────────────────────────────────────────────────

/// Player shot, travels straight up.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
}

/// Enemy bomb, falls straight down.
#[derive(Clone, Debug, PartialEq)]
pub struct Bomb {
    pub x: f32,
    pub y: f32,
}

/// A purely visual blast left behind by a kill or a hit.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    /// Remaining ticks to display.
    pub timer: u32,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum PlayerState {
    Alive,
    /// Hit and blowing up; the ship is neither drawn nor controllable.
    Exploding(Explosion),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub lives: u32,
    pub state: PlayerState,
}

impl Player {
    pub fn is_exploding(&self) -> bool {
        matches!(self.state, PlayerState::Exploding(_))
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Role of a grid enemy; decides its sprite, attacks and bounty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rank {
    Normal,
    Bomber,
    Elite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Whether a grid enemy is marching with the formation or diving at the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stance {
    InFormation,
    Diving,
}

/// An enemy that lives in the grid formation.
#[derive(Clone, Debug, PartialEq)]
pub struct FormationEnemy {
    pub rank: Rank,
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
    /// Spawn coordinates; a dive always ends with a jump back here.
    pub home_x: f32,
    pub home_y: f32,
    pub stance: Stance,
}

/// The boss: swings side to side on a sine wave and soaks up bullets.
#[derive(Clone, Debug, PartialEq)]
pub struct MegaEnemy {
    pub x: f32,
    pub y: f32,
    pub health: u32,
    /// Sine clock driving the horizontal swing.
    pub elapsed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Enemy {
    Formation(FormationEnemy),
    Mega(MegaEnemy),
}

impl Enemy {
    pub fn kind(&self) -> EnemyKind {
        match self {
            Enemy::Formation(e) => match e.rank {
                Rank::Normal => EnemyKind::Normal,
                Rank::Bomber => EnemyKind::Bomber,
                Rank::Elite => EnemyKind::Elite,
            },
            Enemy::Mega(_) => EnemyKind::Mega,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        match self {
            Enemy::Formation(e) => (e.x, e.y),
            Enemy::Mega(m) => (m.x, m.y),
        }
    }

    /// Sprite (and hit-box) size
    pub fn size(&self) -> (f32, f32) {
        match self {
            Enemy::Formation(_) => (ENEMY_WIDTH, ENEMY_HEIGHT),
            Enemy::Mega(_) => (MEGA_WIDTH, MEGA_HEIGHT),
        }
    }

    pub fn is_diving(&self) -> bool {
        matches!(self, Enemy::Formation(e) if e.stance == Stance::Diving)
    }

    /// Grid enemies currently marching with the formation
    pub fn as_marching(&self) -> Option<&FormationEnemy> {
        match self {
            Enemy::Formation(e) if e.stance == Stance::InFormation => Some(e),
            _ => None,
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire state of one run.  Owned by the session for the duration of
/// a tick; collaborators only ever see it through a snapshot.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    /// Kept in creation order; collision ties resolve in this order.
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub bombs: Vec<Bomb>,
    pub explosions: Vec<Explosion>,
    /// Shared horizontal speed of the marching formation.
    pub formation_speed: f32,
    pub score: u32,
    pub level: u32,
    pub paused: bool,
    pub bombs_enabled: bool,
    pub status: GameStatus,
    /// Unpaused ticks simulated so far.
    pub frame: u64,
}
