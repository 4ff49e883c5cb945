//! LcdView: maps the emulated LCD and a session snapshot into a terminal
//! framebuffer.
//!
//! The board is drawn from the display memory, not from the game state, so
//! the terminal shows exactly the characters the runner wrote. The snapshot
//! only feeds the status panel and the game-over overlay.
//!
//! Three layouts are available:
//!
//! - [`Orientation::Native`]: the module as it sits on the bench, 2 lines of
//!   16 characters, one terminal column per pixel and two pixel rows per
//!   terminal row (upper half blocks).
//! - [`Orientation::Upright`]: the same pixels turned a quarter clockwise so
//!   the playfield stands upright.
//! - [`Orientation::Compact`]: upright, one terminal cell pair per playfield
//!   cell, for small terminals.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::SessionSnapshot;
use crate::fb::{palette, Cell, CellStyle, FrameBuffer, Rgb};
use crate::lcd::LcdDisplay;
use crate::types::{GLYPH_HEIGHT, GLYPH_WIDTH, LCD_COLUMNS, LCD_LINES, PLAYFIELD_COLS};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Native,
    Upright,
    Compact,
}

/// Pixel pitch of one character cell, gap included
const CELL_PITCH_X: usize = GLYPH_WIDTH + 1;
const CELL_PITCH_Y: usize = GLYPH_HEIGHT + 1;

/// Native pixel grid size
const NATIVE_PX_W: usize = LCD_COLUMNS * CELL_PITCH_X - 1;
const NATIVE_PX_H: usize = LCD_LINES * CELL_PITCH_Y - 1;

/// Terminal columns per playfield cell in the compact layout
const COMPACT_CELL_W: u16 = 2;

const PANEL_GAP: u16 = 2;
const PANEL_MIN_W: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pixel {
    On,
    Off,
    Glass,
}

impl Pixel {
    fn color(self) -> Rgb {
        match self {
            Pixel::On => palette::PIXEL_ON,
            Pixel::Off => palette::PIXEL_OFF,
            Pixel::Glass => palette::GLASS,
        }
    }
}

impl Orientation {
    /// Pixel grid (width, height) in this orientation
    fn pixel_size(self) -> (usize, usize) {
        match self {
            Orientation::Native => (NATIVE_PX_W, NATIVE_PX_H),
            Orientation::Upright => (NATIVE_PX_H, NATIVE_PX_W),
            Orientation::Compact => (PLAYFIELD_COLS, LCD_COLUMNS),
        }
    }

    /// Board area size in terminal cells, frame excluded
    pub fn inner_size(self) -> (u16, u16) {
        let (w, h) = self.pixel_size();
        match self {
            Orientation::Native | Orientation::Upright => (w as u16, h.div_ceil(2) as u16),
            Orientation::Compact => (w as u16 * COMPACT_CELL_W, h as u16),
        }
    }

    /// Board size including the frame
    pub fn frame_size(self) -> (u16, u16) {
        let (w, h) = self.inner_size();
        (w + 2, h + 2)
    }

    pub fn fits(self, viewport: Viewport) -> bool {
        let (w, h) = self.frame_size();
        w <= viewport.width && h <= viewport.height
    }
}

/// Pixel at native coordinates, gaps between characters included
fn native_pixel(lcd: &LcdDisplay, x: usize, y: usize) -> Pixel {
    let (column, px) = (x / CELL_PITCH_X, x % CELL_PITCH_X);
    let (line, py) = (y / CELL_PITCH_Y, y % CELL_PITCH_Y);
    if px == GLYPH_WIDTH || py == GLYPH_HEIGHT || line >= LCD_LINES {
        return Pixel::Glass;
    }
    if lcd.pixel(line, column, px, py) {
        Pixel::On
    } else {
        Pixel::Off
    }
}

/// Half a character: pixel rows 0-3 draw the right playfield column,
/// rows 4-7 the left one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HalfFill {
    Empty,
    Partial,
    Full,
}

fn half_fill(lcd: &LcdDisplay, line: usize, column: usize, left: bool) -> HalfFill {
    let rows = if left {
        GLYPH_HEIGHT / 2..GLYPH_HEIGHT
    } else {
        0..GLYPH_HEIGHT / 2
    };
    let total = rows.len() * GLYPH_WIDTH;
    let lit = rows
        .flat_map(|y| (0..GLYPH_WIDTH).map(move |x| (x, y)))
        .filter(|&(x, y)| lcd.pixel(line, column, x, y))
        .count();
    match lit {
        0 => HalfFill::Empty,
        n if n == total => HalfFill::Full,
        _ => HalfFill::Partial,
    }
}

/// A terminal renderer for the emulated LCD.
#[derive(Debug, Clone, Copy, Default)]
pub struct LcdView {
    /// `None` picks the largest layout that fits
    orientation: Option<Orientation>,
}

impl LcdView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn orientation_for(&self, viewport: Viewport) -> Orientation {
        self.orientation.unwrap_or_else(|| {
            [Orientation::Native, Orientation::Upright]
                .into_iter()
                .find(|o| o.fits(viewport))
                .unwrap_or(Orientation::Compact)
        })
    }

    /// Render into an existing framebuffer.
    ///
    /// This is the allocation-free hot path once the framebuffer has reached
    /// the viewport size.
    pub fn render_into(
        &self,
        lcd: &LcdDisplay,
        snap: &SessionSnapshot,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let orientation = self.orientation_for(viewport);
        let (frame_w, frame_h) = orientation.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.draw_box(
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(palette::TEXT, palette::BEZEL),
        );

        let (x0, y0) = (start_x + 1, start_y + 1);
        match orientation {
            Orientation::Native | Orientation::Upright => {
                self.draw_pixels(fb, lcd, orientation, x0, y0)
            }
            Orientation::Compact => self.draw_compact(fb, lcd, x0, y0),
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w, start_y);

        if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        lcd: &LcdDisplay,
        snap: &SessionSnapshot,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(lcd, snap, viewport, &mut fb);
        fb
    }

    fn draw_pixels(
        &self,
        fb: &mut FrameBuffer,
        lcd: &LcdDisplay,
        orientation: Orientation,
        x0: u16,
        y0: u16,
    ) {
        let (px_w, px_h) = orientation.pixel_size();
        let sample = |x: usize, y: usize| -> Pixel {
            if y >= px_h {
                return Pixel::Glass;
            }
            match orientation {
                // quarter turn clockwise: native top edge ends up on the right
                Orientation::Upright => native_pixel(lcd, y, NATIVE_PX_H - 1 - x),
                _ => native_pixel(lcd, x, y),
            }
        };

        for ty in 0..px_h.div_ceil(2) {
            for x in 0..px_w {
                let top = sample(x, 2 * ty);
                let bottom = sample(x, 2 * ty + 1);
                fb.put_char(
                    x0 + x as u16,
                    y0 + ty as u16,
                    '▀',
                    CellStyle::new(top.color(), bottom.color()),
                );
            }
        }
    }

    fn draw_compact(&self, fb: &mut FrameBuffer, lcd: &LcdDisplay, x0: u16, y0: u16) {
        let style = CellStyle::new(palette::PIXEL_ON, palette::PIXEL_OFF);
        for row in 0..LCD_COLUMNS {
            // leftmost playfield column first
            for (i, col) in (0..PLAYFIELD_COLS).rev().enumerate() {
                let line = col / 2;
                let left = col % 2 == 1;
                let ch = match half_fill(lcd, line, row, left) {
                    HalfFill::Empty => ' ',
                    HalfFill::Partial => '▒',
                    HalfFill::Full => '█',
                };
                let x = x0 + i as u16 * COMPACT_CELL_W;
                fb.fill_rect(x, y0 + row as u16, COMPACT_CELL_W, 1, ch, style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        frame_right: u16,
        start_y: u16,
    ) {
        let panel_x = frame_right.saturating_add(PANEL_GAP);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), palette::BACKGROUND);
        let hint = CellStyle::new(Rgb::new(130, 130, 130), palette::BACKGROUND);

        let mut y = start_y;
        let mut line = |fb: &mut FrameBuffer, text: &str, number: Option<u32>, style: CellStyle| {
            if y < viewport.height {
                let end = fb.put_str(panel_x, y, text, style);
                if let Some(n) = number {
                    fb.put_u32(end + 1, y, n, value);
                }
            }
            y = y.saturating_add(1);
        };

        line(fb, "LCD TETRIS", None, label);
        line(fb, "", None, value);
        line(fb, "LEVEL", Some(snap.level as u32 + 1), label);
        line(fb, "DELAY", Some(snap.delay as u32), label);
        if snap.rows_remaining > 0 {
            line(fb, "NEXT IN", Some(snap.rows_remaining as u32), label);
        } else {
            line(fb, "MAX SPEED", None, label);
        }
        line(fb, "LINES", Some(snap.lines), label);
        line(fb, "PIECES", Some(snap.pieces), label);
        line(fb, "", None, value);

        if snap.game_over {
            line(fb, "PRESS A KEY", None, label);
        } else {
            line(fb, "←→  move", None, hint);
            line(fb, "↑   rotate", None, hint);
            line(fb, "spc drop", None, hint);
        }
        line(fb, "q   quit", None, hint);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), palette::BACKGROUND).bold();
        fb.put_str(x, mid_y, text, style);
    }
}
