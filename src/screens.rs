//! Blocking full-screen menus shown between and around runs.
//!
//! Every screen owns the terminal until it returns; key events arrive over
//! the same channel the game loop reads from.

use std::io::Write;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use aether_onslaught::highscores::{HighScores, Initials};
use crossterm::{
    event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color},
    terminal, QueueableCommand,
};

use crate::display::draw_centered;

const BLINK: Duration = Duration::from_millis(500);
const BANNER: Duration = Duration::from_secs(2);
const CREDITS: Duration = Duration::from_secs(5);

const CREDIT_LINES: [(&str, Color); 5] = [
    ("Programming and graphics by", Color::White),
    ("Brian Zimmerman using Grok", Color::Cyan),
    ("", Color::White),
    ("Music arranged by", Color::White),
    ("Brian Zimmerman 2025", Color::Cyan),
];

pub enum StartChoice {
    Start,
    Quit,
}

/// Only fresh presses count; repeats and releases are ignored on menus.
fn pressed(event: Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn clear<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    Ok(())
}

fn finish<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.flush()
}

/// Throw away keys pressed while a timed screen was up.
fn drain(rx: &mpsc::Receiver<Event>) {
    while rx.try_recv().is_ok() {}
}

// ── Start screen ──────────────────────────────────────────────────────────────

pub fn start_screen<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    scores: &HighScores,
) -> std::io::Result<StartChoice> {
    let mut table: Vec<String> = scores
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {}  {:>6}", i + 1, e.initials, e.score))
        .collect();
    if table.is_empty() {
        table.push("no high scores yet".to_string());
    }
    let best = format!("Best Score: {}", scores.top_score().unwrap_or(0));

    let mut visible = true;
    loop {
        let mut lines: Vec<(&str, Color)> = vec![
            ("★  AETHER  ONSLAUGHT  ★", Color::Cyan),
            ("", Color::White),
            (best.as_str(), Color::Yellow),
            ("", Color::White),
            ("HIGH SCORES", Color::Yellow),
        ];
        lines.extend(table.iter().map(|row| (row.as_str(), Color::White)));
        lines.push(("", Color::White));
        lines.push((if visible { "Press S to Start" } else { "" }, Color::Green));
        lines.push(("Q : Quit", Color::DarkGrey));

        clear(out)?;
        draw_centered(out, &lines, 6)?;
        finish(out)?;

        match rx.recv_timeout(BLINK) {
            Ok(event) => {
                let Some(key) = pressed(event) else { continue };
                match key.code {
                    KeyCode::Char('s') | KeyCode::Char('S') => return Ok(StartChoice::Start),
                    _ if is_quit(&key) => return Ok(StartChoice::Quit),
                    _ => {}
                }
            }
            Err(RecvTimeoutError::Timeout) => visible = !visible,
            Err(RecvTimeoutError::Disconnected) => return Ok(StartChoice::Quit),
        }
    }
}

// ── Level banner ──────────────────────────────────────────────────────────────

pub fn level_banner<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    level: u32,
) -> std::io::Result<()> {
    let title = format!("Level {level}");
    clear(out)?;
    draw_centered(out, &[(title.as_str(), Color::Yellow)], 0)?;
    finish(out)?;
    std::thread::sleep(BANNER);
    drain(rx);
    Ok(())
}

// ── Initials entry ────────────────────────────────────────────────────────────

/// Ask for three letters.  `None` when the player quits instead.
pub fn enter_initials<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    score: u32,
) -> std::io::Result<Option<Initials>> {
    drain(rx);
    let headline = format!("NEW HIGH SCORE: {score}");
    let mut typed = String::new();
    loop {
        let slots: String = (0..3)
            .map(|i| typed.chars().nth(i).unwrap_or('_'))
            .flat_map(|c| [c, ' '])
            .collect();
        let prompt = if typed.len() == 3 {
            "ENTER to confirm"
        } else {
            "Type your initials"
        };
        clear(out)?;
        draw_centered(
            out,
            &[
                (headline.as_str(), Color::Yellow),
                ("", Color::White),
                (slots.trim_end(), Color::Cyan),
                ("", Color::White),
                (prompt, Color::DarkGrey),
            ],
            2,
        )?;
        finish(out)?;

        let Ok(event) = rx.recv() else {
            return Ok(None);
        };
        let Some(key) = pressed(event) else { continue };
        match key.code {
            KeyCode::Enter if typed.len() == 3 => {
                return Ok(Initials::new(&typed).ok());
            }
            KeyCode::Backspace => {
                typed.pop();
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() && typed.len() < 3 => {
                typed.push(c.to_ascii_uppercase());
            }
            KeyCode::Esc => return Ok(None),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None);
            }
            _ => {}
        }
    }
}

// ── Game over ─────────────────────────────────────────────────────────────────

/// Returns `true` when the player wants another run.
pub fn game_over_screen<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    score: u32,
) -> std::io::Result<bool> {
    drain(rx);
    let final_score = format!("Final Score: {score}");
    clear(out)?;
    draw_centered(
        out,
        &[
            ("GAME OVER", Color::Red),
            ("", Color::White),
            (final_score.as_str(), Color::Yellow),
            ("", Color::White),
            ("Play Again? (Y/N)", Color::White),
        ],
        2,
    )?;
    finish(out)?;

    loop {
        let Ok(event) = rx.recv() else {
            return Ok(false);
        };
        let Some(key) = pressed(event) else { continue };
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
            KeyCode::Char('n') | KeyCode::Char('N') => return Ok(false),
            _ if is_quit(&key) => return Ok(false),
            _ => {}
        }
    }
}

// ── Credits ───────────────────────────────────────────────────────────────────

pub fn credits<W: Write>(out: &mut W) -> std::io::Result<()> {
    let shown = Instant::now();
    clear(out)?;
    draw_centered(out, &CREDIT_LINES, 2)?;
    finish(out)?;
    std::thread::sleep(CREDITS.saturating_sub(shown.elapsed()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_name_the_author_and_composer() {
        let text: Vec<&str> = CREDIT_LINES.iter().map(|(line, _)| *line).collect();
        assert_eq!(
            text,
            [
                "Programming and graphics by",
                "Brian Zimmerman using Grok",
                "",
                "Music arranged by",
                "Brian Zimmerman 2025",
            ]
        );
    }
}
