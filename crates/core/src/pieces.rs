//! Pieces module - the shape catalog and the rotation transform
//!
//! A shape is two rows of a 2-bit wide pattern. Bit 0 is the rightmost column
//! and columns grow leftward, matching the playfield rows.

use crate::types::{PATTERN_COUNT, PATTERN_SIZE, SPAWN_COL, SPAWN_ROW};

/// A falling-piece pattern: `rows[0]` is the top row, each row a 2-bit bitset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: [u8; PATTERN_SIZE],
}

impl Shape {
    pub const fn new(top: u8, bottom: u8) -> Self {
        Self {
            rows: [top, bottom],
        }
    }

    pub fn rows(&self) -> [u8; PATTERN_SIZE] {
        self.rows
    }

    /// Row `index` of the pattern (0 = top)
    #[inline(always)]
    pub fn row(&self, index: usize) -> u8 {
        self.rows[index]
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }

    /// Pattern row `index` shifted into playfield alignment for column `col`.
    ///
    /// Returns `None` when the shift would leave the 8-bit row word; callers
    /// treat that as a collision.
    #[inline(always)]
    pub fn aligned_row(&self, index: usize, col: i8) -> Option<u8> {
        let row = self.rows[index];
        if row == 0 {
            return Some(0);
        }
        if col < -1 {
            return None;
        }
        let shift = (col as i16 + 1) as u32;
        (row as u32)
            .checked_shl(shift)
            .and_then(|shifted| u8::try_from(shifted).ok())
    }
}

/// A catalog shape anchored on the playfield.
///
/// `row` is the playfield row of the pattern's top row; `col` is the playable
/// column of the pattern's rightmost column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub shape: Shape,
    pub row: i8,
    pub col: i8,
}

impl ActivePiece {
    pub fn new(shape: Shape, row: i8, col: i8) -> Self {
        Self { shape, row, col }
    }

    /// Spawn a shape at the spawn anchor
    pub fn spawn(shape: Shape) -> Self {
        Self::new(shape, SPAWN_ROW, SPAWN_COL)
    }

    /// Same piece moved by (`drow`, `dcol`)
    pub fn offset(self, drow: i8, dcol: i8) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
            ..self
        }
    }

    /// Same anchor, different shape
    pub fn with_shape(self, shape: Shape) -> Self {
        Self { shape, ..self }
    }
}

/// The piece catalog, order-stable
pub const PIECES: [Shape; PATTERN_COUNT] = [
    // single cell
    Shape::new(0b01, 0b00),
    // vertical domino
    Shape::new(0b01, 0b01),
    // corner tromino
    Shape::new(0b01, 0b11),
    // square
    Shape::new(0b11, 0b11),
];

/// Look up a catalog shape by index
pub fn get_shape(index: usize) -> Option<Shape> {
    PIECES.get(index).copied()
}

/// Rotate a shape by 90° and normalize it into the top-right corner of its
/// 2x2 bounding box.
pub fn rotate(shape: Shape) -> Shape {
    let [src0, src1] = shape.rows;

    let mut dst0 = (src0 >> 1) | ((src1 >> 1) << 1);
    let mut dst1 = (src0 & 0b01) | ((src1 & 0b01) << 1);

    // Empty top row: shift the pattern up
    if dst0 == 0 {
        dst0 = dst1;
        dst1 = 0;
    }

    // Empty rightmost column: shift the pattern right
    if dst0 & 0b01 == 0 && dst1 & 0b01 == 0 {
        dst0 >>= 1;
        dst1 >>= 1;
    }

    Shape::new(dst0, dst1)
}

/// Try to rotate a shape in place (no wall kicks).
///
/// Returns the rotated shape if it is free at the current anchor, `None` if it
/// collides and the previous shape must be kept.
pub fn try_rotate(
    shape: Shape,
    row: i8,
    col: i8,
    collides: impl Fn(Shape, i8, i8) -> bool,
) -> Option<Shape> {
    let rotated = rotate(shape);
    if collides(rotated, row, col) {
        None
    } else {
        Some(rotated)
    }
}
