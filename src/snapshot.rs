//! Read-only view of a run handed to the renderer each frame.
//!
//! Nothing in here points back into the live state, so a renderer can hold
//! on to a snapshot as long as it likes.

use crate::consts::*;
use crate::entities::{Enemy, EnemyKind, GameState, GameStatus, PlayerState};

/// An axis-aligned sprite rectangle in canvas units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Sprite {
    fn new((x, y): (f32, f32), (w, h): (f32, f32)) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub sprite: Sprite,
    /// Remaining hit points, boss only
    pub health: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    /// The ship, or `None` while it is blowing up
    pub player: Option<Sprite>,
    pub player_explosion: Option<Sprite>,
    pub bullets: Vec<Sprite>,
    pub bombs: Vec<Sprite>,
    pub explosions: Vec<Sprite>,
    pub enemies: Vec<EnemyView>,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub bombs_enabled: bool,
    pub status: GameStatus,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let explosion_size = (EXPLOSION_WIDTH, EXPLOSION_HEIGHT);
        let player = &state.player;
        let (ship, blast) = match &player.state {
            PlayerState::Alive => (
                Some(Sprite::new((player.x, player.y), (PLAYER_WIDTH, PLAYER_HEIGHT))),
                None,
            ),
            PlayerState::Exploding(e) => (None, Some(Sprite::new((e.x, e.y), explosion_size))),
        };

        Self {
            width: state.config.width,
            height: state.config.height,
            player: ship,
            player_explosion: blast,
            bullets: state
                .bullets
                .iter()
                .map(|b| Sprite::new((b.x, b.y), (BULLET_WIDTH, BULLET_HEIGHT)))
                .collect(),
            bombs: state
                .bombs
                .iter()
                .map(|b| Sprite::new((b.x, b.y), (BOMB_WIDTH, BOMB_HEIGHT)))
                .collect(),
            explosions: state
                .explosions
                .iter()
                .map(|e| Sprite::new((e.x, e.y), explosion_size))
                .collect(),
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    kind: e.kind(),
                    sprite: Sprite::new(e.position(), e.size()),
                    health: match e {
                        Enemy::Mega(m) => Some(m.health),
                        Enemy::Formation(_) => None,
                    },
                })
                .collect(),
            score: state.score,
            level: state.level,
            lives: player.lives,
            bombs_enabled: state.bombs_enabled,
            status: state.status,
        }
    }
}
