//! Runner - one frame of the game loop over the collaborator traits

use anyhow::Result;

use crate::collab::{Audio, Display, InputSource, RandomSource};
use crate::core::glyph::{Screen, GLYPH_BITMAPS};
use crate::core::{GameSession, SessionSnapshot};
use crate::types::{Button, LCD_LINES};

pub struct Runner<R: RandomSource> {
    session: GameSession,
    rng: R,
    screen: Screen,
    frames: u64,
}

impl<R: RandomSource> Runner<R> {
    pub fn new(rng: R) -> Self {
        Self {
            session: GameSession::new(),
            rng,
            screen: Screen::new(),
            frames: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    /// Last composed screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.session.snapshot_into(out);
    }

    /// Upload the glyph set, start the session and draw the first frame
    pub fn boot(&mut self, display: &mut impl Display, audio: &mut impl Audio) -> Result<()> {
        for (index, bitmap) in GLYPH_BITMAPS.iter().enumerate() {
            display.upload_glyph(index as u8, bitmap)?;
        }

        self.session.start(&mut self.rng);
        self.forward_events(audio)?;
        self.draw(display)
    }

    /// Run exactly one frame. Returns the button consumed this frame.
    pub fn step(
        &mut self,
        display: &mut impl Display,
        input: &mut impl InputSource,
        audio: &mut impl Audio,
    ) -> Result<Button> {
        self.frames = self.frames.wrapping_add(1);
        let button = input.poll()?;

        if self.session.game_over() {
            if !button.is_none() {
                log::info!("restart on {}", button.as_str());
                self.session.restart(&mut self.rng);
            }
        } else {
            self.session.apply_button(button, &mut self.rng);
            self.session.tick(&mut self.rng);
        }

        self.forward_events(audio)?;
        self.draw(display)?;
        Ok(button)
    }

    fn forward_events(&mut self, audio: &mut impl Audio) -> Result<()> {
        for event in self.session.take_events() {
            audio.play(event)?;
        }
        Ok(())
    }

    fn draw(&mut self, display: &mut impl Display) -> Result<()> {
        if let Err(e) = self.session.render_into(&mut self.screen) {
            log::error!("render failed: {}", e);
            return Err(e.into());
        }

        for line in 0..LCD_LINES {
            display.set_cursor(line as u8, 0)?;
            for glyph in self.screen.line(line) {
                display.write_glyph(glyph.display_code())?;
            }
        }
        Ok(())
    }
}
