//! Formation controller: per-level enemy layout and the shared wall bounce.

use crate::config::GameConfig;
use crate::consts::*;
use crate::entities::{Direction, Enemy, FormationEnemy, MegaEnemy, Rank, Stance};

/// A freshly spawned enemy set together with its starting speed.
#[derive(Clone, Debug)]
pub struct Formation {
    pub enemies: Vec<Enemy>,
    pub speed: f32,
}

// ── Level tables ──────────────────────────────────────────────────────────────

/// Grid rows for a non-boss level: one extra row every three levels, capped.
pub fn rows_for_level(level: u32) -> usize {
    let extra = level.saturating_sub(1) as usize / 3;
    (BASE_ROWS + extra).min(MAX_ROWS)
}

/// Rank of every enemy in `row`. Only the top row is ever promoted.
pub fn rank_for(level: u32, row: usize) -> Rank {
    match row {
        0 if level >= ELITE_ROW_LEVEL => Rank::Elite,
        0 if level >= BOMBER_ROW_LEVEL => Rank::Bomber,
        _ => Rank::Normal,
    }
}

/// Top-left corner of a grid cell
pub fn grid_position(row: usize, col: usize) -> (f32, f32) {
    (
        GRID_ORIGIN_X + col as f32 * (ENEMY_WIDTH + GRID_GUTTER),
        GRID_ORIGIN_Y + row as f32 * (ENEMY_HEIGHT + GRID_GUTTER),
    )
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Build the enemy set for `level`.  Deterministic: the same level always
/// yields the same enemies in the same order.
pub fn spawn(level: u32, config: &GameConfig) -> Formation {
    let enemies = if config.is_boss_level(level) {
        vec![spawn_mega(config)]
    } else {
        spawn_grid(level)
    };
    let speed = config.level_start_speed(level);
    log::debug!(
        "Spawned level {level}: {} enemies, formation speed {speed:.2}",
        enemies.len()
    );
    Formation { enemies, speed }
}

fn spawn_grid(level: u32) -> Vec<Enemy> {
    let rows = rows_for_level(level);
    let mut enemies = Vec::with_capacity(rows * GRID_COLUMNS);
    for row in 0..rows {
        let rank = rank_for(level, row);
        for col in 0..GRID_COLUMNS {
            let (x, y) = grid_position(row, col);
            enemies.push(Enemy::Formation(FormationEnemy {
                rank,
                x,
                y,
                direction: Direction::Right,
                home_x: x,
                home_y: y,
                stance: Stance::InFormation,
            }));
        }
    }
    enemies
}

fn spawn_mega(config: &GameConfig) -> Enemy {
    Enemy::Mega(MegaEnemy {
        x: config.width / 2.0 - MEGA_WIDTH / 2.0,
        y: config.height / 2.0 - MEGA_HEIGHT / 2.0,
        health: MEGA_HEALTH,
        elapsed: 0.0,
    })
}

// ── Wall bounce ───────────────────────────────────────────────────────────────

fn touches_wall(enemy: &FormationEnemy, width: f32) -> bool {
    enemy.x <= 0.0 || enemy.x >= width - ENEMY_WIDTH
}

/// If any marching enemy touches a side wall, reverse and step down every
/// marching enemy and speed the formation up.  The scan completes before the
/// group reversal, so the bounce happens at most once per call no matter how
/// many enemies sit on the wall.  Returns whether a bounce happened.
pub fn bounce_at_walls(enemies: &mut [Enemy], speed: &mut f32, config: &GameConfig) -> bool {
    let hit_wall = enemies
        .iter()
        .filter_map(Enemy::as_marching)
        .any(|e| touches_wall(e, config.width));
    if !hit_wall {
        return false;
    }

    for enemy in enemies.iter_mut() {
        if let Enemy::Formation(e) = enemy {
            if e.stance == Stance::InFormation {
                e.direction = e.direction.reversed();
                e.y += config.row_step;
            }
        }
    }
    *speed += config.bounce_speed_increase;
    true
}
