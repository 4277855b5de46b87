mod display;
mod screens;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use aether_onslaught::audio::{route_events, AudioSink, SilentAudio, TerminalBell};
use aether_onslaught::entities::{GameState, GameStatus};
use aether_onslaught::highscores::HighScoreStore;
use aether_onslaught::snapshot::Snapshot;
use aether_onslaught::{init_state, tick, GameConfig, GameEvent, TickInput};

use screens::StartChoice;

/// Logs go to a file; the terminal belongs to the game.
const LOG_FILE: &str = "aether_onslaught.log";

/// Set to anything to run without the terminal bell
const MUTE_ENV_VAR: &str = "AETHER_MUTE";

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms at
/// 60 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Letters are tracked lower-case so Shift or Caps Lock don't split a key in two.
fn normalise(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
enum RunEnd {
    /// Out of lives, or the simulation gave up
    Finished,
    /// The player asked to leave
    Quit,
}

/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the keys still "fresh"
/// (within `HOLD_WINDOW` frames) become the held directions, so Space and
/// A/D work together.  One-shot keys (fire, pause, bombs) are counted per
/// press and handed to the tick as intents.
///
/// Terminals with keyboard enhancement send `Release` and the key is dropped
/// at once; classic terminals only send `Press` and the key expires after
/// `HOLD_WINDOW` frames of silence.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    state: &mut GameState,
    audio: &mut dyn AudioSink,
) -> std::io::Result<RunEnd> {
    let mut rng = thread_rng();
    let budget = Duration::from_secs_f64(1.0 / f64::from(state.config.frame_rate));

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut input = TickInput::default();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(key) = event else { continue };
            let code = normalise(key.code);
            match key.kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(RunEnd::Quit),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(RunEnd::Quit);
                        }
                        KeyCode::Char(' ') => input.fire += 1,
                        KeyCode::Char('p') => input.toggle_pause ^= true,
                        KeyCode::Char('b') => input.toggle_bombs ^= true,
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        input.left = is_held(&key_frame, &KeyCode::Left, frame)
            || is_held(&key_frame, &KeyCode::Char('a'), frame);
        input.right = is_held(&key_frame, &KeyCode::Right, frame)
            || is_held(&key_frame, &KeyCode::Char('d'), frame);

        match tick(state, &input, &mut rng) {
            Ok(events) => {
                route_events(audio, &events);
                for event in &events {
                    if let GameEvent::LevelCleared { level } = event {
                        screens::level_banner(out, rx, *level)?;
                        key_frame.clear();
                    }
                }
            }
            Err(e) => {
                log::error!("Run aborted: {e}");
                return Ok(RunEnd::Finished);
            }
        }

        display::render(out, &Snapshot::capture(state))?;
        if state.status == GameStatus::GameOver {
            return Ok(RunEnd::Finished);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
        }
    }
}

// ── Run lifecycle ─────────────────────────────────────────────────────────────

/// What follows the high-score step once a run is over.
#[derive(Debug, PartialEq, Eq)]
enum AfterRun {
    /// Game-over screen with the replay prompt
    OfferReplay,
    /// Straight to the credits and out
    Credits,
}

fn after_run(end: &RunEnd) -> AfterRun {
    match end {
        RunEnd::Finished => AfterRun::OfferReplay,
        RunEnd::Quit => AfterRun::Credits,
    }
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    audio: &mut dyn AudioSink,
) -> std::io::Result<()> {
    let store = HighScoreStore::default();
    let mut scores = store.load();
    log::info!("High score file: {}", store.path().display());

    if let StartChoice::Quit = screens::start_screen(out, rx, &scores)? {
        return Ok(());
    }

    loop {
        let mut state = init_state(config.clone());
        log::info!("New run started");
        screens::level_banner(out, rx, state.level)?;

        audio.start_music();
        let end = game_loop(out, rx, &mut state, audio)?;
        audio.stop_music();
        log::info!(
            "Run ended ({end:?}) at level {} with {} points after {} frames",
            state.level,
            state.score,
            state.frame
        );

        // A quit run still gets its score recorded
        if scores.qualifies(state.score) {
            if let Some(initials) = screens::enter_initials(out, rx, state.score)? {
                if let Some(rank) = scores.insert(initials, state.score) {
                    log::info!("High score entered at rank {rank}");
                }
                if let Err(e) = store.save(&scores) {
                    log::warn!("Could not save high scores: {e}");
                }
            }
        }

        match after_run(&end) {
            AfterRun::OfferReplay => {
                if !screens::game_over_screen(out, rx, state.score)? {
                    break;
                }
            }
            AfterRun::Credits => break,
        }
    }

    screens::credits(out)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging() {
    let Ok(file) = File::create(LOG_FILE) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn main() -> aether_onslaught::Result<()> {
    init_logging();

    let config = GameConfig::from_env().unwrap_or_else(|e| {
        log::warn!("Ignoring config ({e}), using defaults");
        GameConfig::default()
    });
    let mut audio: Box<dyn AudioSink> = if std::env::var_os(MUTE_ENV_VAR).is_some() {
        Box::new(SilentAudio)
    } else {
        Box::new(TerminalBell::new(stdout()))
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &config, audio.as_mut());

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("Terminal error: {e}");
    }
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_run_offers_a_replay() {
        assert_eq!(after_run(&RunEnd::Finished), AfterRun::OfferReplay);
    }

    #[test]
    fn quit_run_rolls_the_credits() {
        assert_eq!(after_run(&RunEnd::Quit), AfterRun::Credits);
    }

    #[test]
    fn held_keys_expire_after_the_window() {
        let mut key_frame = HashMap::new();
        key_frame.insert(KeyCode::Left, 10);
        assert!(is_held(&key_frame, &KeyCode::Left, 10 + HOLD_WINDOW));
        assert!(!is_held(&key_frame, &KeyCode::Left, 11 + HOLD_WINDOW));
        assert!(!is_held(&key_frame, &KeyCode::Right, 10));
    }

    #[test]
    fn letters_are_tracked_lower_case() {
        assert_eq!(normalise(KeyCode::Char('A')), KeyCode::Char('a'));
        assert_eq!(normalise(KeyCode::Left), KeyCode::Left);
    }
}
