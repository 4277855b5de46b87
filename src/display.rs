//! Rendering layer — all in-game terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable snapshot of the
//! run.  No game logic is performed; this module only scales the logical
//! canvas onto the terminal grid and translates it into terminal commands.

use std::io::Write;

use aether_onslaught::entities::{EnemyKind, GameStatus};
use aether_onslaught::snapshot::{EnemyView, Snapshot, Sprite};
use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_ENEMY_NORMAL: Color = Color::Green;
const C_ENEMY_BOMBER: Color = Color::Red;
const C_ENEMY_ELITE: Color = Color::Cyan;
const C_ENEMY_MEGA: Color = Color::Magenta;
const C_BULLET: Color = Color::White;
const C_BOMB: Color = Color::Yellow;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

// ── Canvas → terminal mapping ─────────────────────────────────────────────────

/// Maps canvas coordinates into the bordered play area.
/// Rows 0 and h-1 hold the HUD and hint; rows 1 and h-2 the border.
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn new(snapshot: &Snapshot, term_w: u16, term_h: u16) -> Self {
        let cols = term_w.saturating_sub(2).max(1);
        let rows = term_h.saturating_sub(4).max(1);
        Self {
            left: 1,
            top: 2,
            cols,
            rows,
            sx: cols as f32 / snapshot.width,
            sy: rows as f32 / snapshot.height,
        }
    }

    /// Terminal cell of a canvas point, or None if it falls outside the play area.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x * self.sx).floor();
        let row = (y * self.sy).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((self.left + col as u16, self.top + row as u16))
    }

    /// Width in cells of a canvas span, never less than one
    fn span_cols(&self, w: f32) -> u16 {
        ((w * self.sx).round() as u16).max(1)
    }

    fn span_rows(&self, h: f32) -> u16 {
        ((h * self.sy).round() as u16).max(1)
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snapshot: &Snapshot) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(snapshot, width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, width, height)?;
    draw_hud(out, snapshot, width)?;

    for enemy in &snapshot.enemies {
        draw_enemy(out, &view, enemy)?;
    }
    for bomb in &snapshot.bombs {
        draw_glyph(out, &view, bomb, "↓", C_BOMB)?;
    }
    for bullet in &snapshot.bullets {
        draw_glyph(out, &view, bullet, "║", C_BULLET)?;
    }
    for explosion in &snapshot.explosions {
        draw_explosion(out, &view, explosion)?;
    }
    if let Some(ship) = &snapshot.player {
        draw_player(out, &view, ship)?;
    }
    if let Some(blast) = &snapshot.player_explosion {
        draw_explosion(out, &view, blast)?;
    }

    draw_controls_hint(out, snapshot, height)?;

    if snapshot.status == GameStatus::Paused {
        draw_pause_overlay(out)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Print `lines` centred on screen, starting `offset` rows above the middle.
pub fn draw_centered<W: Write>(
    out: &mut W,
    lines: &[(&str, Color)],
    offset: u16,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let start_row = (height / 2).saturating_sub(offset);
    for (i, (text, color)) in lines.iter().enumerate() {
        let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*text))?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snapshot: &Snapshot, width: u16) -> std::io::Result<()> {
    let status = format!("Score: {}  Level: {}", snapshot.score, snapshot.level);
    let sx = (width / 2).saturating_sub(status.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&status))?;

    if !snapshot.bombs_enabled {
        out.queue(cursor::MoveTo(1, 0))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print("[bombs off]"))?;
    }

    // One ship per remaining life, right-aligned
    let ships = "▲ ".repeat(snapshot.lives as usize);
    let lx = width.saturating_sub(ships.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(ships))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: &Viewport, ship: &Sprite) -> std::io::Result<()> {
    //  /▲\      wings spread across the ship's scaled width
    let Some((col, row)) = view.cell(ship.x, ship.y) else {
        return Ok(());
    };
    let cells = view.span_cols(ship.w) as usize;
    let body = if cells >= 3 {
        format!("/{}\\", "▲".repeat(cells - 2))
    } else {
        "▲".repeat(cells)
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(body))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &EnemyView) -> std::io::Result<()> {
    let sprite = &enemy.sprite;
    let Some((col, row)) = view.cell(sprite.x, sprite.y) else {
        return Ok(());
    };
    let cells = view.span_cols(sprite.w) as usize;

    let (color, face) = match enemy.kind {
        EnemyKind::Normal => (C_ENEMY_NORMAL, ('«', '▼', '»')),
        EnemyKind::Bomber => (C_ENEMY_BOMBER, ('(', '◎', ')')),
        EnemyKind::Elite => (C_ENEMY_ELITE, ('<', '♦', '>')),
        EnemyKind::Mega => return draw_mega(out, view, enemy, col, row),
    };
    let glyph = if cells >= 3 {
        format!("{}{}{}", face.0, face.1.to_string().repeat(cells - 2), face.2)
    } else {
        face.1.to_string()
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_mega<W: Write>(
    out: &mut W,
    view: &Viewport,
    enemy: &EnemyView,
    col: u16,
    row: u16,
) -> std::io::Result<()> {
    let cells = view.span_cols(enemy.sprite.w) as usize;
    let rows = view.span_rows(enemy.sprite.h);
    let bottom = view.top + view.rows;
    out.queue(style::SetForegroundColor(C_ENEMY_MEGA))?;
    for r in 0..rows {
        if row + r >= bottom {
            break;
        }
        out.queue(cursor::MoveTo(col, row + r))?;
        out.queue(Print("█".repeat(cells)))?;
    }
    if let Some(health) = enemy.health {
        let label = format!("HP {health}");
        out.queue(cursor::MoveTo(col, row.saturating_sub(1).max(view.top)))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(label))?;
    }
    Ok(())
}

fn draw_glyph<W: Write>(
    out: &mut W,
    view: &Viewport,
    sprite: &Sprite,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(sprite.x, sprite.y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_explosion<W: Write>(out: &mut W, view: &Viewport, blast: &Sprite) -> std::io::Result<()> {
    let cells = view.span_cols(blast.w) as usize;
    draw_glyph(out, view, blast, &"✶".repeat(cells), C_EXPLOSION)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    height: u16,
) -> std::io::Result<()> {
    let hint = if snapshot.status == GameStatus::Paused {
        "P : Resume   Q : Quit"
    } else {
        "← → / A D : Move   SPACE : Shoot   P : Pause   B : Bombs   Q : Quit"
    };
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Pause overlay ─────────────────────────────────────────────────────────────

fn draw_pause_overlay<W: Write>(out: &mut W) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔═══════════════════════╗", Color::White),
        ("║        PAUSED         ║", Color::White),
        ("║  Press P to continue  ║", Color::White),
        ("╚═══════════════════════╝", Color::White),
    ];
    draw_centered(out, lines, 2)
}
