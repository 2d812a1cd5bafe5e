/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// world-space rectangles into coloured terminal cells.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::{Bounds, GameState, GameStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY: Color = Color::DarkCyan;
const C_PLAYER: Color = Color::Green;
const C_PIPE: Color = Color::Red;
const C_ENEMY: Color = Color::Blue;
const C_BULLET: Color = Color::Black;
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

const HINT: &str = "SPACE / ↑ / X : Jump   ↓ : Dive   Q : Quit";

// ── Projection ────────────────────────────────────────────────────────────────

/// A rectangle of terminal cells, relative to the viewport origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

/// Maps the world onto the terminal.  A cell is twice as tall as it is wide,
/// so one row covers twice the world units of one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Left edge of the play area on screen.
    pub origin_col: u16,
    pub cols: u16,
    pub rows: u16,
    term_rows: u16,
    /// World units per column.
    scale: f32,
}

impl Viewport {
    /// Largest aspect-correct play area for the given terminal, centred
    /// horizontally and anchored to the top row.
    pub fn fit(board_width: f32, board_height: f32, term_cols: u16, term_rows: u16) -> Self {
        let term_cols = term_cols.max(1);
        let term_rows = term_rows.max(1);
        let scale = (board_width / term_cols as f32).max(board_height / (term_rows as f32 * 2.0));
        let cols = ((board_width / scale).round() as u16).clamp(1, term_cols);
        let rows = ((board_height / (scale * 2.0)).round() as u16).clamp(1, term_rows);
        Self {
            origin_col: (term_cols - cols) / 2,
            cols,
            rows,
            term_rows,
            scale,
        }
    }

    /// Cells covered by `b`, clipped to the play area.  `None` when nothing
    /// of it is visible.
    pub fn project(&self, b: &impl Bounds) -> Option<CellRect> {
        let sx = self.scale;
        let sy = self.scale * 2.0;
        let left = (b.x() / sx).floor().max(0.0);
        let right = ((b.x() + b.width()) / sx).ceil().min(self.cols as f32);
        let top = (b.y() / sy).floor().max(0.0);
        let bottom = ((b.y() + b.height()) / sy).ceil().min(self.rows as f32);
        if right <= left || bottom <= top {
            return None;
        }
        Some(CellRect {
            col: left as u16,
            row: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    fill(
        out,
        view,
        CellRect {
            col: 0,
            row: 0,
            width: view.cols,
            height: view.rows,
        },
        C_SKY,
    )?;

    for pipe in &state.pipes {
        draw_entity(out, view, pipe, C_PIPE)?;
    }
    for enemy in &state.enemies {
        draw_entity(out, view, enemy, C_ENEMY)?;
    }
    for bullet in &state.bullets {
        draw_entity(out, view, bullet, C_BULLET)?;
    }
    draw_entity(out, view, &state.player, C_PLAYER)?;

    draw_hud(out, state, view)?;
    draw_controls_hint(out, view)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows))?;
    out.flush()?;
    Ok(())
}

// ── Primitives ────────────────────────────────────────────────────────────────

fn fill<W: Write>(out: &mut W, view: &Viewport, rect: CellRect, color: Color) -> std::io::Result<()> {
    let blank = " ".repeat(rect.width as usize);
    out.queue(style::SetBackgroundColor(color))?;
    for row in rect.row..rect.row + rect.height {
        out.queue(cursor::MoveTo(view.origin_col + rect.col, row))?;
        out.queue(Print(&blank))?;
    }
    Ok(())
}

fn draw_entity<W: Write>(
    out: &mut W,
    view: &Viewport,
    entity: &impl Bounds,
    color: Color,
) -> std::io::Result<()> {
    match view.project(entity) {
        Some(rect) => fill(out, view, rect, color),
        None => Ok(()),
    }
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(C_SKY))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;

    out.queue(cursor::MoveTo(view.origin_col + 1, 0))?;
    out.queue(Print(format_score(state.score)))?;

    if state.status == GameStatus::GameOver && view.rows > 2 {
        out.queue(cursor::MoveTo(view.origin_col + 1, 2))?;
        out.queue(Print("GAME OVER"))?;
    }
    Ok(())
}

/// Whole scores print without a fraction, half points as `.5`.
pub fn format_score(score: f32) -> String {
    format!("{}", score)
}

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    if view.rows >= view.term_rows {
        return Ok(());
    }
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(view.origin_col, view.rows))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(HINT))?;
    Ok(())
}
