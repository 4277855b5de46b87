//! Collision & damage resolver
//!
//! Each pass scans a collection and records what to remove in a mask; the
//! removals are applied after the scan so nothing is skipped or visited twice.
//! All box tests are inclusive on every edge.

use crate::audio::SoundCue;
use crate::behavior;
use crate::consts::*;
use crate::entities::{Enemy, EnemyKind, Explosion, GameState, Player, PlayerState};
use crate::session::GameEvent;

/// Inclusive point-in-rectangle test.
pub fn point_in_rect(px: f32, py: f32, rx: f32, ry: f32, rw: f32, rh: f32) -> bool {
    px >= rx && px <= rx + rw && py >= ry && py <= ry + rh
}

fn touches_player(player: &Player, x: f32, y: f32) -> bool {
    point_in_rect(x, y, player.x, player.y, PLAYER_WIDTH, PLAYER_HEIGHT)
}

pub fn points_for(kind: EnemyKind) -> u32 {
    match kind {
        EnemyKind::Normal => SCORE_NORMAL,
        EnemyKind::Bomber => SCORE_BOMBER,
        EnemyKind::Elite => SCORE_ELITE,
        EnemyKind::Mega => SCORE_MEGA,
    }
}

/// Take a life and start the player explosion where the ship stands.
/// The caller guarantees the player is not already exploding.
pub fn hit_player(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;
    player.lives = player.lives.saturating_sub(1);
    player.state = PlayerState::Exploding(Explosion {
        x: player.x,
        y: player.y,
        timer: state.config.explosion_duration,
    });
    events.push(GameEvent::Sound(SoundCue::Explosion));
    events.push(GameEvent::PlayerHit {
        lives: player.lives,
    });
    log::debug!("Player hit, {} lives left", player.lives);
}

// ── Bomb ↔ player ─────────────────────────────────────────────────────────────

/// At most one bomb lands per tick.  Returns whether the player was hit.
pub fn resolve_bombs_vs_player(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if state.player.is_exploding() {
        return false;
    }
    let Some(index) = state
        .bombs
        .iter()
        .position(|b| touches_player(&state.player, b.x, b.y))
    else {
        return false;
    };
    state.bombs.remove(index);
    hit_player(state, events);
    true
}

// ── Diving enemy ↔ player ─────────────────────────────────────────────────────

/// Diving enemies that ram the player cost a life and return home.  The
/// returned mask flags those enemies; they sit out bullet checks this tick.
pub fn resolve_dives_vs_player(state: &mut GameState, events: &mut Vec<GameEvent>) -> Vec<bool> {
    let mut rammed = vec![false; state.enemies.len()];
    for (i, slot) in rammed.iter_mut().enumerate() {
        if state.player.is_exploding() {
            break;
        }
        let Enemy::Formation(enemy) = &state.enemies[i] else {
            continue;
        };
        if !state.enemies[i].is_diving() || !touches_player(&state.player, enemy.x, enemy.y) {
            continue;
        }
        hit_player(state, events);
        if let Enemy::Formation(enemy) = &mut state.enemies[i] {
            behavior::return_home(enemy);
        }
        *slot = true;
    }
    rammed
}

// ── Bullet ↔ enemy ────────────────────────────────────────────────────────────

/// Each enemy takes at most one bullet per tick and each bullet hits at most
/// one enemy.  Diving enemies and those in `skip` are not hit-testable.
pub fn resolve_bullets_vs_enemies(
    state: &mut GameState,
    skip: &[bool],
    events: &mut Vec<GameEvent>,
) {
    let mut spent = vec![false; state.bullets.len()];
    let mut destroyed = vec![false; state.enemies.len()];

    for (ei, enemy) in state.enemies.iter_mut().enumerate() {
        if skip.get(ei).copied().unwrap_or(false) || enemy.is_diving() {
            continue;
        }
        let (ex, ey) = enemy.position();
        let (ew, eh) = enemy.size();
        let Some(bi) = state
            .bullets
            .iter()
            .enumerate()
            .position(|(bi, b)| !spent[bi] && point_in_rect(b.x, b.y, ex, ey, ew, eh))
        else {
            continue;
        };
        spent[bi] = true;
        let bullet = &state.bullets[bi];

        let killed = match enemy {
            Enemy::Mega(mega) => {
                mega.health = mega.health.saturating_sub(1);
                state.explosions.push(Explosion {
                    x: bullet.x - EXPLOSION_WIDTH / 2.0,
                    y: bullet.y - EXPLOSION_HEIGHT / 2.0,
                    timer: state.config.explosion_duration,
                });
                events.push(GameEvent::Sound(SoundCue::Explosion));
                if mega.health == 0 {
                    state.explosions.push(Explosion {
                        x: mega.x + MEGA_WIDTH / 2.0 - EXPLOSION_WIDTH / 2.0,
                        y: mega.y + MEGA_HEIGHT / 2.0 - EXPLOSION_HEIGHT / 2.0,
                        timer: state.config.explosion_duration,
                    });
                    events.push(GameEvent::Sound(SoundCue::Explosion));
                }
                mega.health == 0
            }
            Enemy::Formation(e) => {
                state.explosions.push(Explosion {
                    x: e.x,
                    y: e.y,
                    timer: state.config.explosion_duration,
                });
                events.push(GameEvent::Sound(SoundCue::Explosion));
                true
            }
        };

        if killed {
            let kind = enemy.kind();
            let points = points_for(kind);
            state.score += points;
            destroyed[ei] = true;
            events.push(GameEvent::EnemyDestroyed { kind, points });
        }
    }

    let mut flags = spent.into_iter();
    state.bullets.retain(|_| !flags.next().unwrap_or(false));
    let mut flags = destroyed.into_iter();
    state.enemies.retain(|_| !flags.next().unwrap_or(false));
}

// ── Enemy reaches bottom ──────────────────────────────────────────────────────

/// The first marching enemy past `height - bottom_margin` hits the player.
pub fn resolve_bottom_reach(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if state.player.is_exploding() {
        return false;
    }
    let limit = state.config.height - state.config.bottom_margin;
    let breached = state
        .enemies
        .iter()
        .filter_map(Enemy::as_marching)
        .any(|e| e.y > limit);
    if breached {
        hit_player(state, events);
    }
    breached
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_test_is_inclusive() {
        assert!(point_in_rect(10.0, 10.0, 10.0, 10.0, 5.0, 5.0));
        assert!(point_in_rect(15.0, 15.0, 10.0, 10.0, 5.0, 5.0));
        assert!(!point_in_rect(15.1, 12.0, 10.0, 10.0, 5.0, 5.0));
        assert!(!point_in_rect(12.0, 9.9, 10.0, 10.0, 5.0, 5.0));
    }

    #[test]
    fn bounty_per_kind() {
        assert_eq!(points_for(EnemyKind::Normal), 10);
        assert_eq!(points_for(EnemyKind::Bomber), 10);
        assert_eq!(points_for(EnemyKind::Elite), 20);
        assert_eq!(points_for(EnemyKind::Mega), 100);
    }
}
