//! Playfield module - manages the settled-cell grid
//!
//! The playfield is 16 rows of 6-bit words plus one sentinel row underneath.
//! Bits 0 and 5 of every row are walls and always set; bits 1-4 are the
//! playable columns. The sentinel row is fully set and acts as the floor, so
//! collision and merge need one shift-and-mask per row and no boundary branches.
//! Coordinates: row 0 is the top, column 0 is the rightmost playable column.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{FULL_ROW, PATTERN_SIZE, PLAYFIELD_ROWS, WALL_ROW};

/// Total number of rows stored, sentinel included
pub const STORED_ROWS: usize = PLAYFIELD_ROWS + 1;

/// Row indices cleared by one merge, in top-to-bottom discovery order.
///
/// Sized for every playable row, so rows seeded full through `set_row` or
/// `from_rows` are reported along with the ones the piece completed.
pub type ClearedRows = ArrayVec<usize, PLAYFIELD_ROWS>;

/// The settled terrain, walls and floor included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Playfield {
    rows: [u8; STORED_ROWS],
}

impl Playfield {
    /// Create an empty playfield: wall-only rows over a full sentinel row
    pub fn new() -> Self {
        let mut rows = [WALL_ROW; STORED_ROWS];
        rows[PLAYFIELD_ROWS] = FULL_ROW;
        Self { rows }
    }

    /// Reset every row to the empty state
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Row bits at `index`. Indices past the sentinel read as solid.
    #[inline(always)]
    pub fn row(&self, index: usize) -> u8 {
        self.rows.get(index).copied().unwrap_or(FULL_ROW)
    }

    /// All stored rows, sentinel last
    pub fn rows(&self) -> &[u8; STORED_ROWS] {
        &self.rows
    }

    /// Check if a playable row has every column filled
    pub fn is_row_full(&self, index: usize) -> bool {
        index < PLAYFIELD_ROWS && self.rows[index] == FULL_ROW
    }

    /// Check if a playable row holds only its wall bits
    pub fn is_row_empty(&self, index: usize) -> bool {
        index < PLAYFIELD_ROWS && self.rows[index] == WALL_ROW
    }

    /// Check the wall and floor invariants
    pub fn walls_intact(&self) -> bool {
        self.rows[..PLAYFIELD_ROWS]
            .iter()
            .all(|&r| r & WALL_ROW == WALL_ROW && r & !FULL_ROW == 0)
            && self.rows[PLAYFIELD_ROWS] == FULL_ROW
    }

    /// Whether `shape` anchored at (`row`, `col`) overlaps settled cells,
    /// walls or the floor.
    ///
    /// `col == -1` is a valid probe and always hits the right wall.
    pub fn collides(&self, shape: Shape, row: i8, col: i8) -> bool {
        if row < 0 {
            return true;
        }
        let mut hit = 0u8;
        for p in 0..PATTERN_SIZE {
            let Some(bits) = shape.aligned_row(p, col) else {
                return true;
            };
            // past the left wall
            if bits & !FULL_ROW != 0 {
                return true;
            }
            hit |= self.row(row as usize + p) & bits;
        }
        hit != 0
    }

    /// Commit `shape` at (`row`, `col`) as settled terrain, then remove full rows.
    ///
    /// The placement must already be collision-checked. Rows are scanned top to
    /// bottom; each full row is collapsed by moving everything above it down one
    /// row and inserting an empty row at the top. The scan then moves on to the
    /// next index without re-examining the row that dropped into place.
    pub fn merge(&mut self, shape: Shape, row: i8, col: i8) -> ClearedRows {
        debug_assert!(!self.collides(shape, row, col), "merge of colliding piece");

        for p in 0..PATTERN_SIZE {
            let bits = shape.aligned_row(p, col).unwrap_or(0);
            if let Some(dst) = usize::try_from(row)
                .ok()
                .and_then(|r| self.rows.get_mut(r + p))
            {
                *dst |= bits;
            }
        }

        let mut cleared = ClearedRows::new();
        for r in 0..PLAYFIELD_ROWS {
            if self.rows[r] == FULL_ROW {
                self.collapse_row(r);
                if cleared.try_push(r).is_err() {
                    log::error!("more than {} rows cleared by one merge", PLAYFIELD_ROWS);
                }
            }
        }
        cleared
    }

    /// Remove row `index` and drop every row above it by one
    fn collapse_row(&mut self, index: usize) {
        self.rows.copy_within(0..index, 1);
        self.rows[0] = WALL_ROW;
    }

    /// Create from raw rows for testing. Walls are forced on and the sentinel
    /// row is forced full.
    pub fn from_rows(rows: [u8; PLAYFIELD_ROWS]) -> Self {
        let mut field = Self::new();
        for (index, bits) in rows.into_iter().enumerate() {
            field.set_row(index, bits);
        }
        field
    }

    /// Overwrite one playable row, keeping the walls set (for testing)
    pub fn set_row(&mut self, index: usize, bits: u8) -> bool {
        match self.rows.get_mut(index) {
            Some(row) if index < PLAYFIELD_ROWS => {
                *row = (bits | WALL_ROW) & FULL_ROW;
                true
            }
            _ => false,
        }
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}
