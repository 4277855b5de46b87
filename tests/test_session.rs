use aether_onslaught::audio::SoundCue;
use aether_onslaught::entities::*;
use aether_onslaught::session::{advance_projectiles, move_player};
use aether_onslaught::{init_state, tick, GameConfig, GameError, GameEvent, TickInput};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn quiet_config() -> GameConfig {
    GameConfig {
        bomb_drop_chance: 0.0,
        dive_chance: 0.0,
        mega_bomb_chance: 0.0,
        ..GameConfig::default()
    }
}

fn grunt(x: f32, y: f32) -> Enemy {
    Enemy::Formation(FormationEnemy {
        rank: Rank::Normal,
        x,
        y,
        direction: Direction::Right,
        home_x: x,
        home_y: y,
        stance: Stance::InFormation,
    })
}

/// Level 1 with a single harmless enemy parked top-left
fn make_state() -> GameState {
    let mut s = init_state(quiet_config());
    s.enemies = vec![grunt(100.0, 100.0)];
    s
}

fn idle() -> TickInput {
    TickInput::default()
}

// ── Player movement ───────────────────────────────────────────────────────────

#[test]
fn held_direction_moves_player() {
    let mut s = make_state();
    move_player(&mut s, &TickInput { left: true, ..idle() });
    assert_eq!(s.player.x, 365.0);
    move_player(&mut s, &TickInput { right: true, ..idle() });
    move_player(&mut s, &TickInput { right: true, ..idle() });
    assert_eq!(s.player.x, 385.0);
}

#[test]
fn movement_clamps_at_both_edges() {
    let mut s = make_state();
    s.player.x = 4.0;
    move_player(&mut s, &TickInput { left: true, ..idle() });
    assert_eq!(s.player.x, 0.0);
    move_player(&mut s, &TickInput { left: true, ..idle() });
    assert_eq!(s.player.x, 0.0);

    s.player.x = 745.0;
    move_player(&mut s, &TickInput { right: true, ..idle() });
    assert_eq!(s.player.x, 750.0);
}

#[test]
fn exploding_player_cannot_move() {
    let mut s = make_state();
    s.player.state = PlayerState::Exploding(Explosion {
        x: 375.0,
        y: 500.0,
        timer: 5,
    });
    move_player(&mut s, &TickInput { left: true, ..idle() });
    assert_eq!(s.player.x, 375.0);
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[test]
fn bullet_leaving_the_top_is_removed() {
    let mut s = make_state();
    // bullet_speed is 7: these land on y = -1 and y = 0
    s.bullets = vec![Bullet { x: 700.0, y: 6.0 }, Bullet { x: 710.0, y: 7.0 }];
    advance_projectiles(&mut s);
    assert_eq!(s.bullets, vec![Bullet { x: 710.0, y: 0.0 }]);

    advance_projectiles(&mut s);
    assert!(s.bullets.is_empty());
}

#[test]
fn bomb_leaving_the_bottom_is_removed() {
    let mut s = make_state();
    s.bombs = vec![Bomb { x: 10.0, y: 595.0 }, Bomb { x: 20.0, y: 596.0 }];
    advance_projectiles(&mut s);
    assert_eq!(s.bombs, vec![Bomb { x: 10.0, y: 600.0 }]);
}

#[test]
fn explosions_expire_after_their_duration() {
    let mut s = make_state();
    s.explosions = vec![Explosion {
        x: 0.0,
        y: 0.0,
        timer: 2,
    }];
    advance_projectiles(&mut s);
    assert_eq!(s.explosions[0].timer, 1);
    advance_projectiles(&mut s);
    assert!(s.explosions.is_empty());
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn fire_launches_one_bullet_per_press() {
    let mut s = make_state();
    let events = tick(&mut s, &TickInput { fire: 2, ..idle() }, &mut seeded_rng()).unwrap();

    // Spawned at the nose of the ship, then flown one step
    assert_eq!(
        s.bullets,
        vec![Bullet { x: 398.0, y: 493.0 }, Bullet { x: 398.0, y: 493.0 }]
    );
    let fired = events
        .iter()
        .filter(|e| **e == GameEvent::Sound(SoundCue::Fire))
        .count();
    assert_eq!(fired, 2);
}

#[test]
fn fire_is_ignored_while_exploding() {
    let mut s = make_state();
    s.player.state = PlayerState::Exploding(Explosion {
        x: 375.0,
        y: 500.0,
        timer: 10,
    });
    tick(&mut s, &TickInput { fire: 1, ..idle() }, &mut seeded_rng()).unwrap();
    assert!(s.bullets.is_empty());
}

// ── Pause & toggles ───────────────────────────────────────────────────────────

#[test]
fn paused_tick_skips_the_simulation() {
    let mut s = make_state();
    s.bullets = vec![Bullet { x: 700.0, y: 300.0 }];
    let mut rng = seeded_rng();

    let events = tick(&mut s, &TickInput { toggle_pause: true, ..idle() }, &mut rng).unwrap();
    assert_eq!(events, vec![GameEvent::Paused]);
    assert_eq!(s.status, GameStatus::Paused);
    assert_eq!(s.frame, 0);

    // Held keys and fire do nothing while paused
    let held = TickInput {
        fire: 1,
        left: true,
        ..idle()
    };
    assert!(tick(&mut s, &held, &mut rng).unwrap().is_empty());
    assert_eq!(s.player.x, 375.0);
    assert_eq!(s.bullets, vec![Bullet { x: 700.0, y: 300.0 }]);
    assert_eq!(s.enemies[0].position(), (100.0, 100.0));

    let events = tick(&mut s, &TickInput { toggle_pause: true, ..idle() }, &mut rng).unwrap();
    assert_eq!(events, vec![GameEvent::Resumed]);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.frame, 1);
    assert_eq!(s.bullets, vec![Bullet { x: 700.0, y: 293.0 }]);
}

#[test]
fn bomb_toggle_reports_new_setting() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let events = tick(&mut s, &TickInput { toggle_bombs: true, ..idle() }, &mut rng).unwrap();
    assert!(!s.bombs_enabled);
    assert_eq!(events, vec![GameEvent::BombsToggled(false)]);

    tick(&mut s, &TickInput { toggle_bombs: true, ..idle() }, &mut rng).unwrap();
    assert!(s.bombs_enabled);
}

#[test]
fn disabled_bombs_silence_bombers() {
    let mut s = init_state(GameConfig {
        bomb_drop_chance: 1.0,
        ..quiet_config()
    });
    s.enemies = vec![Enemy::Formation(FormationEnemy {
        rank: Rank::Bomber,
        x: 100.0,
        y: 100.0,
        direction: Direction::Right,
        home_x: 100.0,
        home_y: 100.0,
        stance: Stance::InFormation,
    })];
    s.bombs_enabled = false;

    for _ in 0..10 {
        tick(&mut s, &idle(), &mut seeded_rng()).unwrap();
    }
    assert!(s.bombs.is_empty());
}

// ── Player death ──────────────────────────────────────────────────────────────

#[test]
fn last_life_lost_ends_the_run_after_explosion() {
    let mut s = make_state();
    s.player.lives = 1;
    s.bombs = vec![Bomb { x: 380.0, y: 505.0 }];
    let mut rng = seeded_rng();

    let events = tick(&mut s, &idle(), &mut rng).unwrap();
    assert_eq!(s.player.lives, 0);
    assert!(s.player.is_exploding());
    assert_eq!(s.status, GameStatus::PlayerExploding);
    assert!(events.contains(&GameEvent::PlayerHit { lives: 0 }));

    // The hit tick already counted once; 29 more finish a 30-tick explosion
    for _ in 0..28 {
        tick(&mut s, &idle(), &mut rng).unwrap();
    }
    assert_eq!(s.status, GameStatus::PlayerExploding);

    let events = tick(&mut s, &idle(), &mut rng).unwrap();
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(events, vec![GameEvent::GameOver { score: 0 }]);

    // Game over is terminal
    let frame = s.frame;
    assert!(tick(&mut s, &TickInput { fire: 1, ..idle() }, &mut rng)
        .unwrap()
        .is_empty());
    assert_eq!(s.frame, frame);
    assert!(s.bullets.is_empty());
}

#[test]
fn surviving_a_hit_respawns_the_level() {
    let mut s = make_state();
    s.player.x = 100.0;
    s.bombs = vec![Bomb { x: 105.0, y: 505.0 }];
    s.bullets = vec![Bullet { x: 700.0, y: 400.0 }];
    let mut rng = seeded_rng();

    for _ in 0..30 {
        tick(&mut s, &idle(), &mut rng).unwrap();
    }
    assert_eq!(s.player.lives, 2);
    assert!(!s.player.is_exploding());
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.player.x, 375.0);
    // Fresh level 1 formation; projectiles cleared
    assert_eq!(s.level, 1);
    assert_eq!(s.enemies.len(), 30);
    assert_eq!(s.formation_speed, 2.0);
    assert!(s.bullets.is_empty() && s.bombs.is_empty());
}

// ── Level progression ─────────────────────────────────────────────────────────

#[test]
fn killing_the_last_enemy_advances_the_level() {
    let mut s = init_state(quiet_config());
    s.enemies = vec![grunt(200.0, 200.0)];
    // After this tick the enemy sits at x = 202 and the bullet at y = 213
    s.bullets = vec![Bullet { x: 210.0, y: 220.0 }];

    let events = tick(&mut s, &idle(), &mut seeded_rng()).unwrap();
    assert_eq!(s.score, 10);
    assert_eq!(s.level, 2);
    assert_eq!(s.status, GameStatus::LevelClear);
    assert_eq!(s.enemies.len(), 30);
    assert!((s.formation_speed - 2.1).abs() < 1e-5);
    assert!(events.contains(&GameEvent::LevelCleared { level: 2 }));

    tick(&mut s, &idle(), &mut seeded_rng()).unwrap();
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn clearing_level_three_brings_bombers() {
    let mut s = init_state(quiet_config());
    s.level = 3;
    s.enemies.clear();
    s.bombs = vec![Bomb { x: 10.0, y: 10.0 }];

    tick(&mut s, &idle(), &mut seeded_rng()).unwrap();
    assert_eq!(s.level, 4);
    assert_eq!(s.enemies.len(), 40);
    assert_eq!(s.enemies[0].kind(), EnemyKind::Bomber);
    assert!(s.bombs.is_empty());
}

#[test]
fn clearing_level_nine_summons_the_boss() {
    let mut s = init_state(quiet_config());
    s.level = 9;
    s.enemies.clear();

    tick(&mut s, &idle(), &mut seeded_rng()).unwrap();
    assert_eq!(s.level, 10);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].kind(), EnemyKind::Mega);
}

#[test]
fn no_level_clear_while_exploding() {
    let mut s = init_state(quiet_config());
    s.enemies.clear();
    s.player.state = PlayerState::Exploding(Explosion {
        x: 375.0,
        y: 500.0,
        timer: 10,
    });

    tick(&mut s, &idle(), &mut seeded_rng()).unwrap();
    assert_eq!(s.level, 1);
    assert_eq!(s.status, GameStatus::PlayerExploding);
}

// ── Collision order within a tick ─────────────────────────────────────────────

#[test]
fn ramming_diver_is_spared_from_bullets_that_tick() {
    let mut s = make_state();
    s.enemies = vec![
        grunt(100.0, 100.0),
        Enemy::Formation(FormationEnemy {
            rank: Rank::Elite,
            x: 380.0,
            y: 495.0,
            direction: Direction::Right,
            home_x: 135.0,
            home_y: 50.0,
            stance: Stance::Diving,
        }),
    ];
    // Would sit inside the enemy's home slot after flying
    s.bullets = vec![Bullet { x: 140.0, y: 67.0 }];

    tick(&mut s, &idle(), &mut seeded_rng()).unwrap();
    assert_eq!(s.player.lives, 2);
    assert_eq!(s.enemies.len(), 2);
    assert_eq!(s.enemies[1].position(), (135.0, 50.0));
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.score, 0);
}

// ── Fail-fast invariants ──────────────────────────────────────────────────────

#[test]
fn boss_outside_its_level_is_a_simulation_fault() {
    let mut s = make_state();
    s.enemies.push(Enemy::Mega(MegaEnemy {
        x: 300.0,
        y: 225.0,
        health: 20,
        elapsed: 0.0,
    }));

    let result = tick(&mut s, &idle(), &mut seeded_rng());
    assert!(matches!(result, Err(GameError::SimulationFault(_))));
    assert_eq!(s.status, GameStatus::GameOver);
}

#[test]
fn lives_above_the_start_are_a_simulation_fault() {
    let mut s = make_state();
    s.player.lives = 5;
    let result = tick(&mut s, &idle(), &mut seeded_rng());
    assert!(matches!(result, Err(GameError::SimulationFault(_))));
}
