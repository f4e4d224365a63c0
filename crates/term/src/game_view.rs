//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure; no I/O. The board is drawn two terminal columns per cell inside a
//! box border, centered in the viewport, with the score above it.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Color;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board frame landed in the last layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFrame {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

const WELL_BG: Rgb = Rgb::new(24, 24, 32);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

const EMPTY: CellStyle = CellStyle::new(Rgb::new(70, 70, 84), WELL_BG).dim();
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
const LABEL: CellStyle = CellStyle::new(Rgb::new(230, 230, 230), SCREEN_BG).bold();
const BANNER: CellStyle = CellStyle::new(Rgb::new(255, 90, 90), SCREEN_BG).bold();
const HINT: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

pub fn palette(color: Color) -> Rgb {
    match color {
        Color::Cyan => Rgb::new(80, 220, 220),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Purple => Rgb::new(200, 120, 220),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Red => Rgb::new(220, 80, 80),
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Orange => Rgb::new(255, 165, 0),
    }
}

pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two glyphs per cell roughly squares the cell on common fonts.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Frame position for a board of `rows` x `columns` in `viewport`.
    ///
    /// One row above the frame is reserved for the score label.
    pub fn layout(&self, rows: usize, columns: usize, viewport: Viewport) -> BoardFrame {
        let width = clamp_u16(columns)
            .saturating_mul(self.cell_w)
            .saturating_add(2);
        let height = clamp_u16(rows).saturating_add(2);
        let x = viewport.width.saturating_sub(width) / 2;
        let y = viewport.height.saturating_sub(height.saturating_add(1)) / 2 + 1;
        BoardFrame {
            x,
            y,
            width,
            height,
        }
    }

    /// Render into a reused framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(HINT.fg, SCREEN_BG).cell(' '));

        let frame = self.layout(snap.rows, snap.columns, viewport);
        draw_box(fb, frame, BORDER);

        // Cells past the viewport edge are clipped, so stop iterating there.
        let visible_rows = snap.rows.min(usize::from(viewport.height));
        let visible_cols = snap
            .columns
            .min(usize::from(viewport.width / self.cell_w) + 1);
        let (left, top) = (frame.x.saturating_add(1), frame.y.saturating_add(1));
        for row in 0..visible_rows {
            for col in 0..visible_cols {
                let (ch, style) = match snap.color_at(row, col) {
                    Some(color) => ('█', CellStyle::new(palette(color), WELL_BG)),
                    None => ('·', EMPTY),
                };
                let x = left.saturating_add(clamp_u16(col).saturating_mul(self.cell_w));
                let y = top.saturating_add(clamp_u16(row));
                fb.fill_rect(x, y, self.cell_w, 1, ch, style);
            }
        }

        let score = format!("Score: {}", snap.score);
        fb.put_str_centered(frame.x, frame.width, frame.y.saturating_sub(1), &score, LABEL);

        if snap.game_over {
            self.draw_game_over(fb, frame, snap.score);
        }
    }

    /// Convenience wrapper that allocates a fresh framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, frame: BoardFrame, score: u32) {
        let lines = [
            ("GAME OVER".to_string(), BANNER),
            (format!("Your score: {score}"), LABEL),
            ("R to restart".to_string(), HINT),
        ];
        let inner_w = frame.width.saturating_sub(2);
        let left = frame.x.saturating_add(1);
        let top = frame.y.saturating_add(frame.height / 2).saturating_sub(1);
        // Blank band behind the text so board cells don't bleed through.
        fb.fill_rect(left, top.saturating_sub(1), inner_w, 5, ' ', HINT);
        for (y, (text, style)) in (top..).zip(lines.iter()) {
            fb.put_str_centered(left, inner_w, y, text, *style);
        }
    }
}

fn draw_box(fb: &mut FrameBuffer, frame: BoardFrame, style: CellStyle) {
    let BoardFrame {
        x,
        y,
        width: w,
        height: h,
    } = frame;
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x.saturating_add(w - 1), y.saturating_add(h - 1));
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in x.saturating_add(1)..right {
        fb.put_char(dx, y, '─', style);
        fb.put_char(dx, bottom, '─', style);
    }
    for dy in y.saturating_add(1)..bottom {
        fb.put_char(x, dy, '│', style);
        fb.put_char(right, dy, '│', style);
    }
}

/// Board sizes are `usize`; the terminal is addressed in `u16`.
fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
