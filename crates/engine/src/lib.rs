//! Engine module - drives one game session against its collaborators
//!
//! The core crate knows nothing about displays, keyboards or speakers. This
//! crate defines those seams as traits ([`Display`], [`InputSource`],
//! [`Audio`]) and runs the frame loop body over them in [`Runner`]. The
//! binary supplies terminal implementations; tests supply fakes.
//!
//! # Frame order
//!
//! 1. poll one button
//! 2. restart if the game is over and a button was pressed, otherwise apply
//!    the button and then gravity
//! 3. forward queued sound events to the audio sink
//! 4. compose the screen and write both display lines
//!
//! The frame delay itself belongs to the caller.

pub mod collab;
pub mod config;
pub mod runner;

pub use lcd_tetris_core as core;
pub use lcd_tetris_types as types;

pub use collab::{Audio, Display, InputSource, RandomSource};
pub use config::EngineConfig;
pub use runner::Runner;
