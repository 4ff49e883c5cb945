//! Terminal-backed button source.

use std::time::{Duration, Instant};

use anyhow::Result;
use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::engine::InputSource;
use crate::handler::InputHandler;
use crate::map::{button_for_key, should_quit};
use crate::types::Button;

/// Presses buffered between two polls
const QUEUE_CAPACITY: usize = 8;

/// Reads crossterm events without blocking and hands out one latched button
/// per poll.
pub struct TerminalInput {
    handler: InputHandler,
    queue: ArrayVec<Button, QUEUE_CAPACITY>,
    last_poll: Instant,
    quit: bool,
}

impl TerminalInput {
    pub fn new(key_release_timeout_ms: u32) -> Self {
        Self {
            handler: InputHandler::new().with_key_release_timeout_ms(key_release_timeout_ms),
            queue: ArrayVec::new(),
            last_poll: Instant::now(),
            quit: false,
        }
    }

    /// Whether a quit key was seen
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Feed one key event through the latch
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Press && should_quit(key) {
            self.quit = true;
            return;
        }

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                // Ctrl chords are never game buttons
                if button_for_key(key).is_none() {
                    return;
                }
                if let Some(button) = self.handler.handle_key_press(key.code) {
                    if self.queue.try_push(button).is_err() {
                        log::debug!("input queue full, dropping {}", button.as_str());
                    }
                }
            }
            KeyEventKind::Release => self.handler.handle_key_release(key.code),
        }
    }

    /// Next latched button, or `Button::None`
    pub fn next_button(&mut self) -> Button {
        if self.queue.is_empty() {
            Button::None
        } else {
            self.queue.remove(0)
        }
    }

    fn drain_events(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<Button> {
        let elapsed = self.last_poll.elapsed().as_millis().min(u32::MAX as u128) as u32;
        self.last_poll = Instant::now();
        self.handler.update(elapsed);

        self.drain_events()?;
        Ok(self.next_button())
    }
}
