//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the four game buttons and turns them into
//! edge-triggered presses: a held key reports once, then again only after it
//! was released. Terminals that never send release events are handled with a
//! timeout, so auto-repeat does not turn into a stream of presses.

pub mod handler;
pub mod map;
pub mod source;

pub use lcd_tetris_engine as engine;
pub use lcd_tetris_types as types;

pub use handler::InputHandler;
pub use map::{button_for_key, should_quit};
pub use source::TerminalInput;
