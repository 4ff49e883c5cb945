//! Glyph module - composes playfield and piece bits into display characters
//!
//! The display is a 2x16 character LCD mounted sideways: playfield row `r` is
//! display column `r`, display line 0 shows playable columns 0-1 and line 1
//! shows columns 2-3. Each character cell therefore covers two playfield cells,
//! and each of those can be empty, falling or settled. The cell state is packed
//! into a 4-bit code:
//!
//! | bit | meaning |
//! |-----|---------|
//! | 3 | left column settled |
//! | 2 | left column falling |
//! | 1 | right column settled |
//! | 0 | right column falling |
//!
//! and a fixed table maps the code to one of eight custom glyphs (or the
//! built-in blank). Codes with a settled and a falling bit in the same column
//! cannot occur unless collision checking was skipped.

use thiserror::Error;

use crate::pieces::ActivePiece;
use crate::playfield::Playfield;
use crate::types::{
    BLANK_CODE, GLYPH_COUNT, GLYPH_HEIGHT, LCD_COLUMNS, LCD_LINES, PATTERN_SIZE, PLAYFIELD_ROWS,
};

/// What one playfield cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fill {
    Empty,
    Falling,
    Settled,
}

/// A character cell: built-in blank or one of the eight custom glyphs.
///
/// Variant names read `<left column><right column>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Glyph {
    #[default]
    Blank = 0xff,
    EmptyFalling = 0,
    EmptySettled = 1,
    FallingEmpty = 2,
    FallingFalling = 3,
    FallingSettled = 4,
    SettledEmpty = 5,
    SettledFalling = 6,
    SettledSettled = 7,
}

impl Glyph {
    /// Index into character generator RAM, `None` for the built-in blank
    pub fn cgram_index(self) -> Option<u8> {
        match self {
            Glyph::Blank => None,
            other => Some(other as u8),
        }
    }

    /// Byte written to display memory for this cell
    pub fn display_code(self) -> u8 {
        self.cgram_index().unwrap_or(BLANK_CODE)
    }

    /// (left column, right column)
    pub fn fills(self) -> (Fill, Fill) {
        use Fill::*;
        match self {
            Glyph::Blank => (Empty, Empty),
            Glyph::EmptyFalling => (Empty, Falling),
            Glyph::EmptySettled => (Empty, Settled),
            Glyph::FallingEmpty => (Falling, Empty),
            Glyph::FallingFalling => (Falling, Falling),
            Glyph::FallingSettled => (Falling, Settled),
            Glyph::SettledEmpty => (Settled, Empty),
            Glyph::SettledFalling => (Settled, Falling),
            Glyph::SettledSettled => (Settled, Settled),
        }
    }
}

/// 2-bit playfield pair → settled bits of the code
pub const SETTLED_SPREAD: [u8; 4] = [0b0000, 0b0010, 0b1000, 0b1010];

/// 2-bit piece pair → falling bits of the code
pub const PIECE_SPREAD: [u8; 4] = [0b0000, 0b0001, 0b0100, 0b0101];

/// Composed 4-bit code → glyph; `None` marks impossible overlaps
pub const GLYPH_TABLE: [Option<Glyph>; 16] = [
    Some(Glyph::Blank),          // 0b0000
    Some(Glyph::EmptyFalling),   // 0b0001
    Some(Glyph::EmptySettled),   // 0b0010
    None,                        // 0b0011
    Some(Glyph::FallingEmpty),   // 0b0100
    Some(Glyph::FallingFalling), // 0b0101
    Some(Glyph::FallingSettled), // 0b0110
    None,                        // 0b0111
    Some(Glyph::SettledEmpty),   // 0b1000
    Some(Glyph::SettledFalling), // 0b1001
    Some(Glyph::SettledSettled), // 0b1010
    None,                        // 0b1011
    None,                        // 0b1100
    None,                        // 0b1101
    None,                        // 0b1110
    None,                        // 0b1111
];

/// Interleave a settled pair and a piece pair into one 4-bit code
#[inline(always)]
pub fn compose(settled: u8, piece: u8) -> u8 {
    SETTLED_SPREAD[(settled & 0b11) as usize] | PIECE_SPREAD[(piece & 0b11) as usize]
}

/// Look up the glyph for a composed code
#[inline(always)]
pub fn glyph_for_code(code: u8) -> Option<Glyph> {
    GLYPH_TABLE.get(code as usize).copied().flatten()
}

const FALLING_HALF: [u8; 4] = [0b10101, 0b01010, 0b10101, 0b01010];
const SETTLED_HALF: [u8; 4] = [0b11111; 4];
const EMPTY_HALF: [u8; 4] = [0; 4];

const fn half(fill: Fill) -> [u8; 4] {
    match fill {
        Fill::Empty => EMPTY_HALF,
        Fill::Falling => FALLING_HALF,
        Fill::Settled => SETTLED_HALF,
    }
}

/// Pixel rows 0-3 draw the right column, rows 4-7 the left column
const fn bitmap(left: Fill, right: Fill) -> [u8; GLYPH_HEIGHT] {
    let top = half(right);
    let bottom = half(left);
    [
        top[0], top[1], top[2], top[3], bottom[0], bottom[1], bottom[2], bottom[3],
    ]
}

/// Custom glyph bitmaps in CGRAM order, uploaded once at startup
pub const GLYPH_BITMAPS: [[u8; GLYPH_HEIGHT]; GLYPH_COUNT] = [
    bitmap(Fill::Empty, Fill::Falling),
    bitmap(Fill::Empty, Fill::Settled),
    bitmap(Fill::Falling, Fill::Empty),
    bitmap(Fill::Falling, Fill::Falling),
    bitmap(Fill::Falling, Fill::Settled),
    bitmap(Fill::Settled, Fill::Empty),
    bitmap(Fill::Settled, Fill::Falling),
    bitmap(Fill::Settled, Fill::Settled),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GlyphError {
    /// A settled cell and a falling cell share a position
    #[error("invalid glyph combination {code:#06b} at line {line}, column {column}")]
    InvalidCombination { line: usize, column: usize, code: u8 },
}

/// One full display image: `cells[line][column]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Screen {
    pub cells: [[Glyph; LCD_COLUMNS]; LCD_LINES],
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, line: usize, column: usize) -> Option<Glyph> {
        self.cells.get(line)?.get(column).copied()
    }

    pub fn line(&self, line: usize) -> &[Glyph; LCD_COLUMNS] {
        &self.cells[line]
    }
}

/// Compose the full screen for `field` with the active piece overlaid.
///
/// Every cell is recomputed on every call. Allocation-free.
pub fn render_into(
    field: &Playfield,
    active: Option<ActivePiece>,
    out: &mut Screen,
) -> Result<(), GlyphError> {
    for (line, cells) in out.cells.iter_mut().enumerate() {
        let shift = 1 + 2 * line as u32;
        for (r, cell) in cells.iter_mut().enumerate().take(PLAYFIELD_ROWS) {
            let settled = (field.row(r) >> shift) & 0b11;
            let piece = active.map_or(0, |a| piece_bits(a, r) >> shift) & 0b11;

            let code = compose(settled, piece);
            *cell = glyph_for_code(code).ok_or(GlyphError::InvalidCombination {
                line,
                column: r,
                code,
            })?;
        }
    }
    Ok(())
}

/// Convenience wrapper returning a fresh screen
pub fn render(field: &Playfield, active: Option<ActivePiece>) -> Result<Screen, GlyphError> {
    let mut screen = Screen::new();
    render_into(field, active, &mut screen)?;
    Ok(screen)
}

/// Piece bits aligned like a playfield row, for playfield row `r`
#[inline(always)]
fn piece_bits(piece: ActivePiece, r: usize) -> u8 {
    (0..PATTERN_SIZE)
        .find(|&p| piece.row as isize + p as isize == r as isize)
        .and_then(|p| piece.shape.aligned_row(p, piece.col))
        .unwrap_or(0)
}
