//! Snapshot module - a copyable, allocation-free view of one session
//!
//! Front ends read snapshots instead of borrowing the live session.

use crate::pieces::ActivePiece;
use crate::playfield::{Playfield, STORED_ROWS};
use crate::types::{LEVELS, PLAYFIELD_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    /// Raw playfield rows, walls and sentinel included
    pub playfield: [u8; STORED_ROWS],
    pub active: Option<ActivePiece>,
    pub level: u8,
    pub delay: u8,
    pub rows_remaining: u8,
    pub lines: u32,
    pub pieces: u32,
    pub started: bool,
    pub game_over: bool,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over
    }

    /// Whether playable cell (`row`, `col`) holds settled terrain
    pub fn settled_at(&self, row: usize, col: usize) -> bool {
        row < PLAYFIELD_ROWS && col < 4 && self.playfield[row] & (1 << (col + 1)) != 0
    }

    /// Whether playable cell (`row`, `col`) is covered by the active piece
    pub fn falling_at(&self, row: usize, col: usize) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let offset = row as isize - piece.row as isize;
        if !(0..2).contains(&offset) || col >= 4 {
            return false;
        }
        piece
            .shape
            .aligned_row(offset as usize, piece.col)
            .is_some_and(|bits| bits & (1 << (col + 1)) != 0)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            playfield: *Playfield::new().rows(),
            active: None,
            level: 0,
            delay: LEVELS[0].delay,
            rows_remaining: LEVELS[0].rows,
            lines: 0,
            pieces: 0,
            started: false,
            game_over: false,
        }
    }
}
