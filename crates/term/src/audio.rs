//! Audio sinks for sound events.
//!
//! A terminal has one sound: the bell. Every event with a non-empty tune rings
//! it once; the notes themselves are only logged.

use std::io::{self, Write};

use anyhow::Result;

use crate::engine::Audio;
use crate::types::SoundEvent;

const BEL: u8 = 0x07;

/// Rings the terminal bell through `W`.
pub struct BellAudio<W: Write> {
    out: W,
    rung: u32,
}

impl BellAudio<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> BellAudio<W> {
    pub fn new(out: W) -> Self {
        Self { out, rung: 0 }
    }

    /// Number of times the bell rang
    pub fn rung(&self) -> u32 {
        self.rung
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Audio for BellAudio<W> {
    fn play(&mut self, event: SoundEvent) -> Result<()> {
        let tune = event.tune();
        log::debug!("sound {} ({} notes)", event.as_str(), tune.len());
        if tune.is_empty() {
            return Ok(());
        }

        for note in tune {
            log::trace!("note {} Hz for {}", note.freq, note.length);
        }
        self.out.write_all(&[BEL])?;
        self.out.flush()?;
        self.rung += 1;
        Ok(())
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct MuteAudio;

impl Audio for MuteAudio {
    fn play(&mut self, event: SoundEvent) -> Result<()> {
        log::debug!("sound {} (muted)", event.as_str());
        Ok(())
    }
}
