//! Collaborator traits for the hardware the game talks to

use anyhow::Result;

use crate::types::{Button, SoundEvent, GLYPH_HEIGHT};

pub use crate::core::rng::RandomSource;

/// A character display with eight user-definable glyphs
pub trait Display {
    /// Store a glyph bitmap in character generator slot `index` (0-7)
    fn upload_glyph(&mut self, index: u8, bitmap: &[u8; GLYPH_HEIGHT]) -> Result<()>;

    /// Move the write cursor
    fn set_cursor(&mut self, line: u8, column: u8) -> Result<()>;

    /// Write one character code at the cursor and advance it by one column
    fn write_glyph(&mut self, code: u8) -> Result<()>;
}

/// Edge-triggered button source: each physical press is reported once
pub trait InputSource {
    fn poll(&mut self) -> Result<Button>;
}

/// Plays the tune bound to a sound event
pub trait Audio {
    fn play(&mut self, event: SoundEvent) -> Result<()>;
}

impl<A: Audio + ?Sized> Audio for Box<A> {
    fn play(&mut self, event: SoundEvent) -> Result<()> {
        (**self).play(event)
    }
}
