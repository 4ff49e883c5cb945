//! Level module - turns line clears into speed advancement
//!
//! Each level holds a fall delay and a countdown of rows to clear. The tracker
//! only ever moves forward and stops at the last level.

use crate::types::{Level, LEVELS, LEVEL_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelTracker {
    /// Working copy of the level table; countdowns are consumed in place
    levels: [Level; LEVEL_COUNT],
    current: usize,
}

impl LevelTracker {
    pub fn new() -> Self {
        Self {
            levels: LEVELS,
            current: 0,
        }
    }

    /// Back to the first level with fresh countdowns
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current level index (0-based)
    pub fn level(&self) -> usize {
        self.current
    }

    /// Frames skipped between falls at the current level
    pub fn delay(&self) -> u8 {
        self.levels[self.current].delay
    }

    /// Rows still to clear before the next level
    pub fn rows_remaining(&self) -> u8 {
        self.levels[self.current].rows
    }

    pub fn is_terminal(&self) -> bool {
        self.current == LEVEL_COUNT - 1
    }

    /// Record one cleared row. Returns true if this advanced the level.
    pub fn on_line_cleared(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }

        let level = &mut self.levels[self.current];
        level.rows = level.rows.saturating_sub(1);
        if level.rows == 0 {
            self.current += 1;
            log::info!(
                "level up: level {} delay {}",
                self.current,
                self.delay()
            );
            return true;
        }
        false
    }
}

impl Default for LevelTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_level_up_after_five_rows() {
        let mut tracker = LevelTracker::new();
        assert_eq!(tracker.delay(), 5);
        for _ in 0..4 {
            assert!(!tracker.on_line_cleared());
        }
        assert_eq!(tracker.rows_remaining(), 1);
        assert!(tracker.on_line_cleared());
        assert_eq!(tracker.level(), 1);
        assert_eq!(tracker.delay(), 4);
        assert_eq!(tracker.rows_remaining(), 10);
    }

    #[test]
    fn test_terminal_level_ignores_clears() {
        let mut tracker = LevelTracker::new();
        let total: u32 = LEVELS.iter().map(|l| l.rows as u32).sum();
        let mut level_ups = 0;
        for _ in 0..total + 50 {
            if tracker.on_line_cleared() {
                level_ups += 1;
            }
        }
        assert_eq!(level_ups, LEVEL_COUNT - 1);
        assert!(tracker.is_terminal());
        assert_eq!(tracker.delay(), 0);
        assert!(!tracker.on_line_cleared());
    }

    #[test]
    fn test_reset_restores_countdowns() {
        let mut tracker = LevelTracker::new();
        for _ in 0..7 {
            tracker.on_line_cleared();
        }
        assert_eq!(tracker.level(), 1);
        tracker.reset();
        assert_eq!(tracker.level(), 0);
        assert_eq!(tracker.rows_remaining(), 5);
    }
}
