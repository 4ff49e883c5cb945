//! Terminal front end for the LCD game.
//!
//! The game believes it talks to a 2x16 character LCD, a speaker and four
//! buttons. This crate provides the terminal stand-ins:
//!
//! - [`LcdDisplay`]: in-memory display controller (glyph RAM + character RAM)
//! - [`LcdView`]: pure mapping of the display into a framebuffer
//! - [`TerminalRenderer`]: diffed framebuffer output via `crossterm`
//! - [`BellAudio`] / [`MuteAudio`]: sound events as terminal bells
//!
//! Rendering never touches game state directly; the view reads back the
//! display memory the runner wrote.

pub mod audio;
pub mod fb;
pub mod lcd;
pub mod lcd_view;
pub mod renderer;

pub use lcd_tetris_core as core;
pub use lcd_tetris_engine as engine;
pub use lcd_tetris_types as types;

pub use audio::{BellAudio, MuteAudio};
pub use fb::{palette, Cell, CellStyle, FrameBuffer, Rgb};
pub use lcd::LcdDisplay;
pub use lcd_view::{LcdView, Orientation, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
