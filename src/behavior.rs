//! Enemy behavior engine: per-frame movement, dives and bomb drops.
//!
//! Enemies update in creation order.  Randomness comes only from the
//! injected RNG so tests can pin it down.

use rand::Rng;

use crate::audio::SoundCue;
use crate::config::GameConfig;
use crate::consts::*;
use crate::entities::{Bomb, Enemy, FormationEnemy, GameState, MegaEnemy, Rank, Stance};
use crate::formation;
use crate::session::GameEvent;

/// Advance every enemy by one tick, then apply the formation wall bounce once.
pub fn update_enemies(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    let GameState {
        config,
        enemies,
        bombs,
        formation_speed,
        bombs_enabled,
        ..
    } = state;

    for enemy in enemies.iter_mut() {
        let dropped = match enemy {
            Enemy::Mega(mega) => update_mega(mega, config, *bombs_enabled, rng),
            Enemy::Formation(e) => {
                update_formation_enemy(e, *formation_speed, config, *bombs_enabled, rng, events)
            }
        };
        if let Some(bomb) = dropped {
            bombs.push(bomb);
            events.push(GameEvent::Sound(SoundCue::BombDrop));
        }
    }

    formation::bounce_at_walls(enemies, formation_speed, config);
}

/// Swing the boss along its sine path; maybe drop a bomb from its belly.
pub fn update_mega(
    mega: &mut MegaEnemy,
    config: &GameConfig,
    bombs_enabled: bool,
    rng: &mut impl Rng,
) -> Option<Bomb> {
    mega.elapsed += config.mega_time_step;
    mega.x = config.width / 2.0 + config.mega_amplitude * mega.elapsed.sin() - MEGA_WIDTH / 2.0;

    (bombs_enabled && rng.gen_bool(config.mega_bomb_chance))
        .then(|| bomb_below(mega.x, mega.y, MEGA_WIDTH, MEGA_HEIGHT))
}

/// One tick for a grid enemy.  Returns a bomb if a bomber let one go.
pub fn update_formation_enemy(
    enemy: &mut FormationEnemy,
    formation_speed: f32,
    config: &GameConfig,
    bombs_enabled: bool,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) -> Option<Bomb> {
    if enemy.rank == Rank::Elite
        && enemy.stance == Stance::InFormation
        && rng.gen_bool(config.dive_chance)
    {
        enemy.stance = Stance::Diving;
        events.push(GameEvent::Sound(SoundCue::Dive));
        log::debug!("Elite at ({:.0}, {:.0}) dives", enemy.x, enemy.y);
    }

    match enemy.stance {
        Stance::Diving => {
            enemy.y += config.dive_speed;
            if enemy.y > config.height {
                return_home(enemy);
            }
        }
        Stance::InFormation => {
            enemy.x += formation_speed * enemy.direction.sign();
        }
    }

    (enemy.rank == Rank::Bomber && bombs_enabled && rng.gen_bool(config.bomb_drop_chance))
        .then(|| bomb_below(enemy.x, enemy.y, ENEMY_WIDTH, ENEMY_HEIGHT))
}

/// End a dive: snap straight back to the spawn slot.
pub fn return_home(enemy: &mut FormationEnemy) {
    enemy.stance = Stance::InFormation;
    enemy.x = enemy.home_x;
    enemy.y = enemy.home_y;
}

fn bomb_below(x: f32, y: f32, width: f32, height: f32) -> Bomb {
    Bomb {
        x: x + (width / 2.0).floor() - (BOMB_WIDTH / 2.0).floor(),
        y: y + height,
    }
}
