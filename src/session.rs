//! Game session state machine
//!
//! `tick` advances a run by exactly one frame.  All randomness comes through
//! the injected RNG and every side effect the outside world cares about is
//! returned as a `GameEvent`, so callers control determinism and presentation.

use rand::Rng;

use crate::audio::SoundCue;
use crate::behavior;
use crate::collision;
use crate::config::GameConfig;
use crate::consts::*;
use crate::entities::{Bullet, Enemy, EnemyKind, GameState, GameStatus, Player, PlayerState};
use crate::error::{GameError, Result};
use crate::formation;

/// Player intent gathered for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Fire presses this frame; each one launches a bullet
    pub fire: u32,
    pub toggle_pause: bool,
    pub toggle_bombs: bool,
    /// Held direction keys
    pub left: bool,
    pub right: bool,
}

/// Something the presentation, audio or persistence side may react to.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sound(SoundCue),
    Paused,
    Resumed,
    BombsToggled(bool),
    PlayerHit { lives: u32 },
    EnemyDestroyed { kind: EnemyKind, points: u32 },
    /// Carries the level that just started
    LevelCleared { level: u32 },
    GameOver { score: u32 },
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state of a run: level 1, full lives, fresh formation.
pub fn init_state(config: GameConfig) -> GameState {
    let (x, y) = config.player_spawn();
    let formation = formation::spawn(1, &config);
    GameState {
        player: Player {
            x,
            y,
            lives: config.starting_lives,
            state: PlayerState::Alive,
        },
        enemies: formation.enemies,
        bullets: Vec::new(),
        bombs: Vec::new(),
        explosions: Vec::new(),
        formation_speed: formation.speed,
        score: 0,
        level: 1,
        paused: false,
        bombs_enabled: true,
        status: GameStatus::Playing,
        frame: 0,
        config,
    }
}

// ── Intent handling ──────────────────────────────────────────────────────────

fn apply_intents(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if input.toggle_pause {
        state.paused = !state.paused;
        events.push(if state.paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        });
    }
    if input.toggle_bombs {
        state.bombs_enabled = !state.bombs_enabled;
        events.push(GameEvent::BombsToggled(state.bombs_enabled));
        log::debug!(
            "Bombs {}",
            if state.bombs_enabled { "enabled" } else { "disabled" }
        );
    }
    if state.paused || state.player.is_exploding() {
        return;
    }
    for _ in 0..input.fire {
        state.bullets.push(Bullet {
            x: state.player.x + (PLAYER_WIDTH / 2.0).floor() - (BULLET_WIDTH / 2.0).floor(),
            y: state.player.y,
        });
        events.push(GameEvent::Sound(SoundCue::Fire));
    }
}

/// Held-direction movement, clamped to the canvas.
pub fn move_player(state: &mut GameState, input: &TickInput) {
    if state.player.is_exploding() {
        return;
    }
    let max_x = state.config.width - PLAYER_WIDTH;
    let p = &mut state.player;
    if input.left && p.x > 0.0 {
        p.x = (p.x - state.config.player_speed).max(0.0);
    }
    if input.right && p.x < max_x {
        p.x = (p.x + state.config.player_speed).min(max_x);
    }
}

/// Fly bullets and bombs, cull what left the canvas, age explosions.
pub fn advance_projectiles(state: &mut GameState) {
    let config = &state.config;

    for bullet in &mut state.bullets {
        bullet.y -= config.bullet_speed;
    }
    state.bullets.retain(|b| b.y >= 0.0);

    for bomb in &mut state.bombs {
        bomb.y += config.bomb_speed;
    }
    state.bombs.retain(|b| b.y <= config.height);

    for explosion in &mut state.explosions {
        explosion.timer = explosion.timer.saturating_sub(1);
    }
    state.explosions.retain(|e| e.timer > 0);
}

/// Replace the enemy set with the formation for the current level.
fn respawn_formation(state: &mut GameState) {
    let formation = formation::spawn(state.level, &state.config);
    state.enemies = formation.enemies;
    state.formation_speed = formation.speed;
    state.bullets.clear();
    state.bombs.clear();
}

fn check_level_clear(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if !state.enemies.is_empty() || state.player.is_exploding() {
        return false;
    }
    state.level += 1;
    respawn_formation(state);
    events.push(GameEvent::LevelCleared { level: state.level });
    log::info!("Level cleared, starting level {}", state.level);
    true
}

/// Count the player explosion down; when it ends, respawn or finish the run.
fn tick_player_explosion(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let PlayerState::Exploding(blast) = &mut state.player.state else {
        return;
    };
    blast.timer = blast.timer.saturating_sub(1);
    if blast.timer > 0 {
        return;
    }

    state.player.state = PlayerState::Alive;
    state.player.x = state.config.player_spawn().0;
    if state.player.lives > 0 {
        respawn_formation(state);
    } else {
        state.status = GameStatus::GameOver;
        events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over at level {} with {} points", state.level, state.score);
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the run by one frame.
///
/// A finished run ignores further ticks.  If the tick leaves the state
/// breaking one of its invariants the run is ended on the spot and a
/// `SimulationFault` is returned.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    rng: &mut impl Rng,
) -> Result<Vec<GameEvent>> {
    let mut events = Vec::new();
    if state.status == GameStatus::GameOver {
        return Ok(events);
    }
    let before = Watermark::of(state);

    apply_intents(state, input, &mut events);
    if state.paused {
        state.status = GameStatus::Paused;
        return Ok(events);
    }
    state.frame += 1;

    move_player(state, input);
    advance_projectiles(state);
    behavior::update_enemies(state, rng, &mut events);

    collision::resolve_bombs_vs_player(state, &mut events);
    let rammed = collision::resolve_dives_vs_player(state, &mut events);
    collision::resolve_bullets_vs_enemies(state, &rammed, &mut events);

    let cleared = check_level_clear(state, &mut events);
    collision::resolve_bottom_reach(state, &mut events);
    tick_player_explosion(state, &mut events);

    if state.status != GameStatus::GameOver {
        state.status = if cleared {
            GameStatus::LevelClear
        } else if state.player.is_exploding() {
            GameStatus::PlayerExploding
        } else {
            GameStatus::Playing
        };
    }

    if let Err(fault) = before.check(state) {
        log::error!("{fault}");
        state.status = GameStatus::GameOver;
        return Err(fault);
    }
    Ok(events)
}

// ── Invariants ───────────────────────────────────────────────────────────────

/// Counters captured before a tick to verify they only moved the right way.
struct Watermark {
    lives: u32,
    score: u32,
    level: u32,
}

impl Watermark {
    fn of(state: &GameState) -> Self {
        Self {
            lives: state.player.lives,
            score: state.score,
            level: state.level,
        }
    }

    fn check(&self, state: &GameState) -> Result<()> {
        let fault = |msg: String| Err(GameError::SimulationFault(msg));
        if state.player.lives > self.lives || state.player.lives > state.config.starting_lives {
            return fault(format!("lives rose from {} to {}", self.lives, state.player.lives));
        }
        if state.score < self.score {
            return fault(format!("score fell from {} to {}", self.score, state.score));
        }
        if state.level < self.level {
            return fault(format!("level fell from {} to {}", self.level, state.level));
        }
        let megas = state
            .enemies
            .iter()
            .filter(|e| matches!(e, Enemy::Mega(_)))
            .count();
        let boss = state.config.is_boss_level(state.level);
        if (boss && state.enemies.len() > 1) || (!boss && megas > 0) {
            return fault(format!(
                "level {} holds {} enemies ({} mega)",
                state.level,
                state.enemies.len(),
                megas
            ));
        }
        let finite = state.player.x.is_finite()
            && state.enemies.iter().all(|e| {
                let (x, y) = e.position();
                x.is_finite() && y.is_finite()
            });
        if !finite {
            return fault("non-finite coordinate".to_string());
        }
        Ok(())
    }
}
