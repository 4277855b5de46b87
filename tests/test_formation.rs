use aether_onslaught::consts::*;
use aether_onslaught::entities::*;
use aether_onslaught::formation::*;
use aether_onslaught::GameConfig;

fn kinds_in_row(enemies: &[Enemy], row: usize) -> Vec<EnemyKind> {
    enemies[row * GRID_COLUMNS..(row + 1) * GRID_COLUMNS]
        .iter()
        .map(Enemy::kind)
        .collect()
}

fn marcher(x: f32, y: f32, direction: Direction) -> Enemy {
    Enemy::Formation(FormationEnemy {
        rank: Rank::Normal,
        x,
        y,
        direction,
        home_x: x,
        home_y: y,
        stance: Stance::InFormation,
    })
}

// ── spawn ─────────────────────────────────────────────────────────────────────

#[test]
fn level_one_is_three_rows_of_normals() {
    let config = GameConfig::default();
    let f = spawn(1, &config);
    assert_eq!(f.enemies.len(), 30);
    assert!(f.enemies.iter().all(|e| e.kind() == EnemyKind::Normal));
    assert_eq!(f.speed, config.base_enemy_speed);
}

#[test]
fn grid_starts_at_origin_with_gutters() {
    let f = spawn(1, &GameConfig::default());
    assert_eq!(f.enemies[0].position(), (75.0, 50.0));
    assert_eq!(f.enemies[1].position(), (135.0, 50.0));
    assert_eq!(f.enemies[10].position(), (75.0, 100.0));
    assert_eq!(f.enemies[29].position(), (615.0, 150.0));
}

#[test]
fn spawned_enemies_march_right_from_home() {
    let f = spawn(2, &GameConfig::default());
    for enemy in &f.enemies {
        let Enemy::Formation(e) = enemy else {
            panic!("grid level spawned a boss");
        };
        assert_eq!(e.direction, Direction::Right);
        assert_eq!(e.stance, Stance::InFormation);
        assert_eq!((e.home_x, e.home_y), (e.x, e.y));
    }
}

#[test]
fn level_four_adds_a_row_and_bombers() {
    let f = spawn(4, &GameConfig::default());
    assert_eq!(f.enemies.len(), 40);
    assert_eq!(kinds_in_row(&f.enemies, 0), vec![EnemyKind::Bomber; 10]);
    for row in 1..4 {
        assert_eq!(kinds_in_row(&f.enemies, row), vec![EnemyKind::Normal; 10]);
    }
    assert!((f.speed - 2.3).abs() < 1e-5);
}

#[test]
fn level_seven_promotes_top_row_to_elites() {
    let f = spawn(7, &GameConfig::default());
    assert_eq!(f.enemies.len(), 50);
    assert_eq!(kinds_in_row(&f.enemies, 0), vec![EnemyKind::Elite; 10]);
    assert_eq!(kinds_in_row(&f.enemies, 4), vec![EnemyKind::Normal; 10]);
}

#[test]
fn boss_level_spawns_one_centered_mega() {
    let f = spawn(10, &GameConfig::default());
    assert_eq!(f.enemies.len(), 1);
    let Enemy::Mega(m) = &f.enemies[0] else {
        panic!("expected the boss");
    };
    assert_eq!((m.x, m.y), (300.0, 225.0));
    assert_eq!(m.health, 20);
    assert_eq!(m.elapsed, 0.0);
}

#[test]
fn levels_after_the_boss_return_to_the_grid() {
    let f = spawn(11, &GameConfig::default());
    assert_eq!(f.enemies.len(), 50);
    assert_eq!(kinds_in_row(&f.enemies, 0), vec![EnemyKind::Elite; 10]);
    assert!(f.enemies.iter().all(|e| e.kind() != EnemyKind::Mega));
}

#[test]
fn boss_level_is_configurable() {
    let config = GameConfig {
        boss_level: 2,
        ..GameConfig::default()
    };
    assert_eq!(spawn(2, &config).enemies[0].kind(), EnemyKind::Mega);
    assert_eq!(spawn(10, &config).enemies.len(), 50);
}

#[test]
fn spawn_is_idempotent() {
    let config = GameConfig::default();
    for level in [1, 4, 7, 10, 12] {
        let a = spawn(level, &config);
        let b = spawn(level, &config);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.speed, b.speed);
    }
}

// ── bounce_at_walls ───────────────────────────────────────────────────────────

#[test]
fn no_bounce_away_from_walls() {
    let config = GameConfig::default();
    let mut enemies = vec![marcher(100.0, 50.0, Direction::Right)];
    let mut speed = 2.0;
    assert!(!bounce_at_walls(&mut enemies, &mut speed, &config));
    assert_eq!(enemies[0], marcher(100.0, 50.0, Direction::Right));
    assert_eq!(speed, 2.0);
}

#[test]
fn right_wall_reverses_and_steps_down_everyone() {
    let config = GameConfig::default();
    let mut enemies = vec![
        marcher(700.0, 50.0, Direction::Right),
        marcher(760.0, 50.0, Direction::Right),
    ];
    let mut speed = 2.0;
    assert!(bounce_at_walls(&mut enemies, &mut speed, &config));

    for enemy in &enemies {
        let Enemy::Formation(e) = enemy else { unreachable!() };
        assert_eq!(e.direction, Direction::Left);
        assert_eq!(e.y, 70.0);
    }
    assert!((speed - 2.2).abs() < 1e-5);
}

#[test]
fn many_enemies_on_the_wall_bounce_once() {
    let config = GameConfig::default();
    let mut enemies = vec![
        marcher(0.0, 50.0, Direction::Left),
        marcher(0.0, 100.0, Direction::Left),
        marcher(-3.0, 150.0, Direction::Left),
    ];
    let mut speed = 2.0;
    bounce_at_walls(&mut enemies, &mut speed, &config);

    // A single reversal: everyone now heads right, one row step lower
    let ys: Vec<f32> = enemies.iter().map(|e| e.position().1).collect();
    assert_eq!(ys, vec![70.0, 120.0, 170.0]);
    assert!(enemies
        .iter()
        .all(|e| matches!(e, Enemy::Formation(f) if f.direction == Direction::Right)));
    assert!((speed - 2.2).abs() < 1e-5);
}

#[test]
fn divers_and_boss_ignore_the_bounce() {
    let config = GameConfig::default();
    let diver = FormationEnemy {
        rank: Rank::Elite,
        x: 0.0,
        y: 300.0,
        direction: Direction::Left,
        home_x: 75.0,
        home_y: 50.0,
        stance: Stance::Diving,
    };
    let mut enemies = vec![Enemy::Formation(diver.clone())];
    let mut speed = 2.0;

    // A diver on the wall does not trigger the bounce by itself
    assert!(!bounce_at_walls(&mut enemies, &mut speed, &config));

    // ...and is not moved when marchers do
    enemies.push(marcher(760.0, 50.0, Direction::Right));
    assert!(bounce_at_walls(&mut enemies, &mut speed, &config));
    assert_eq!(enemies[0], Enemy::Formation(diver));

    let mut boss = vec![Enemy::Mega(MegaEnemy {
        x: 0.0,
        y: 225.0,
        health: 20,
        elapsed: 0.0,
    })];
    assert!(!bounce_at_walls(&mut boss, &mut speed, &config));
}
