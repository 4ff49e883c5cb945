//! Edge-latching input handler for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use crossterm::event::KeyCode;

use crate::map::button_for_code;
use crate::types::{Button, DEFAULT_KEY_RELEASE_MS};

/// Tracks which button is held so that repeats are swallowed.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: Option<Button>,
    idle_ms: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held: None,
            idle_ms: 0,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn held(&self) -> Option<Button> {
        self.held
    }

    /// Key went down (or auto-repeated). Returns the button on a fresh press.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Button> {
        let button = button_for_code(code)?;
        self.idle_ms = 0;
        if self.held == Some(button) {
            return None;
        }
        self.held = Some(button);
        Some(button)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let Some(button) = button_for_code(code) else {
            return;
        };
        if self.held == Some(button) {
            self.held = None;
            self.idle_ms = 0;
        }
    }

    /// Advance the release timer by `elapsed_ms` with no key activity.
    pub fn update(&mut self, elapsed_ms: u32) {
        if self.held.is_none() {
            return;
        }
        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms > self.key_release_timeout_ms {
            self.held = None;
            self.idle_ms = 0;
        }
    }

    pub fn reset(&mut self) {
        self.held = None;
        self.idle_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
