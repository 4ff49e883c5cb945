//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the terminal LCD emulator and the input layer alike.
//!
//! # Playfield Layout
//!
//! The playfield is a column of bit-packed rows sized for a 2x16 character LCD
//! mounted sideways: every playfield row becomes one display column, and the
//! four playable columns are split across the two display lines.
//!
//! - **Rows**: 16 (indexed 0-15, top to bottom) plus one sentinel floor row (16)
//! - **Columns**: 4 playable (bits 1-4) between two wall bits (bits 0 and 5)
//! - **Horizontal axis**: bit 0 is the right wall, column numbers grow leftward
//! - **Spawn position**: row 0, column 1
//!
//! # Speed Levels
//!
//! Gravity is expressed in frames skipped between falls:
//!
//! | Level | Delay | Rows to clear |
//! |-------|-------|---------------|
//! | 0 | 5 | 5 |
//! | 1 | 4 | 10 |
//! | 2 | 3 | 15 |
//! | 3 | 2 | 20 |
//! | 4 | 1 | 30 |
//! | 5 | 0 | terminal |
//!
//! # Examples
//!
//! ```
//! use lcd_tetris_types::{Button, SoundEvent, FULL_ROW, LEVELS, WALL_ROW};
//!
//! // Parse input buttons (case-insensitive)
//! assert_eq!(Button::from_str("rotate"), Some(Button::Rotate));
//! assert_eq!(Button::from_str("DROP"), Some(Button::Drop));
//!
//! // Walls are baked into every row
//! assert_eq!(WALL_ROW, 0b100001);
//! assert_eq!(FULL_ROW, 0b111111);
//!
//! // The last level never advances
//! assert_eq!(LEVELS[LEVELS.len() - 1].delay, 0);
//!
//! // Tunes are plain data
//! assert_eq!(SoundEvent::GameOver.tune().len(), 3);
//! ```

/// Playable rows (the sentinel floor row is extra)
pub const PLAYFIELD_ROWS: usize = 16;

/// Playable columns between the two wall bits
pub const PLAYFIELD_COLS: usize = 4;

/// Rows of a piece pattern
pub const PATTERN_SIZE: usize = 2;

/// Number of shapes in the piece catalog
pub const PATTERN_COUNT: usize = 4;

/// A row holding only the two wall bits
pub const WALL_ROW: u8 = 0b100001;

/// A row with the walls and every playable column set (also the sentinel row)
pub const FULL_ROW: u8 = 0b111111;

/// Spawn anchor for new pieces (row, column)
pub const SPAWN_ROW: i8 = 0;
pub const SPAWN_COL: i8 = 1;

/// Character LCD geometry
pub const LCD_LINES: usize = 2;
pub const LCD_COLUMNS: usize = 16;

/// User-definable glyph slots in the display's character generator RAM
pub const GLYPH_COUNT: usize = 8;

/// Glyph bitmap size in pixels (5 wide, 8 tall; one byte per pixel row)
pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 8;

/// Display code of the built-in blank character
pub const BLANK_CODE: u8 = b' ';

/// Default frame period in milliseconds
pub const DEFAULT_FRAME_MS: u32 = 100;

/// Default input release timeout for terminals without key-release events
pub const DEFAULT_KEY_RELEASE_MS: u32 = 150;

/// One speed level: frames skipped between falls, and rows to clear before
/// advancing to the next level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Level {
    pub delay: u8,
    pub rows: u8,
}

impl Level {
    pub const fn new(delay: u8, rows: u8) -> Self {
        Self { delay, rows }
    }
}

/// Number of speed levels
pub const LEVEL_COUNT: usize = 6;

/// Speed level table, fastest last. The last entry is terminal.
pub const LEVELS: [Level; LEVEL_COUNT] = [
    Level::new(5, 5),
    Level::new(4, 10),
    Level::new(3, 15),
    Level::new(2, 20),
    Level::new(1, 30),
    Level::new(0, 0),
];


/// Input buttons as delivered by an edge-triggered input source
///
/// A held button yields exactly one event until it is released and pressed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Button {
    /// Nothing new this frame
    #[default]
    None,
    /// Move piece one column left
    Left,
    /// Move piece one column right
    Right,
    /// Rotate piece 90°
    Rotate,
    /// Drop piece to the lowest free row and lock it
    Drop,
}

impl Button {
    /// Parse button from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use lcd_tetris_types::Button;
    ///
    /// assert_eq!(Button::from_str("left"), Some(Button::Left));
    /// assert_eq!(Button::from_str("Right"), Some(Button::Right));
    /// assert_eq!(Button::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(Button::None),
            "left" => Some(Button::Left),
            "right" => Some(Button::Right),
            "rotate" => Some(Button::Rotate),
            "drop" => Some(Button::Drop),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Button::None => "none",
            Button::Left => "left",
            Button::Right => "right",
            Button::Rotate => "rotate",
            Button::Drop => "drop",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Button::None)
    }
}

/// One tone: frequency and length in tone-generator units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pub freq: u16,
    pub length: u16,
}

impl Note {
    pub const fn new(freq: u16, length: u16) -> Self {
        Self { freq, length }
    }
}

const TUNE_START: [Note; 1] = [Note::new(2000, 40)];
const TUNE_LEVEL_UP: [Note; 1] = [Note::new(3000, 20)];
const TUNE_GAME_OVER: [Note; 3] = [
    Note::new(1000, 200),
    Note::new(1500, 200),
    Note::new(2000, 400),
];

/// Discrete events handed to the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    /// A new session started
    Start,
    /// One playfield row was cleared
    LineCleared,
    /// The speed level advanced
    LevelUp,
    /// A freshly spawned piece collided immediately
    GameOver,
}

impl SoundEvent {
    /// Tune played for this event. Line clears are silent.
    pub fn tune(&self) -> &'static [Note] {
        match self {
            SoundEvent::Start => &TUNE_START,
            SoundEvent::LineCleared => &[],
            SoundEvent::LevelUp => &TUNE_LEVEL_UP,
            SoundEvent::GameOver => &TUNE_GAME_OVER,
        }
    }

    /// Convert to snake_case string
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEvent::Start => "start",
            SoundEvent::LineCleared => "line_cleared",
            SoundEvent::LevelUp => "level_up",
            SoundEvent::GameOver => "game_over",
        }
    }
}
