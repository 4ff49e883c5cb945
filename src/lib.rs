//! LCD Tetris (workspace facade crate).
//!
//! Re-exports the member crates under `lcd_tetris::{core,engine,input,term,types}`
//! so binaries, tests and benches share one import path.

pub use lcd_tetris_core as core;
pub use lcd_tetris_engine as engine;
pub use lcd_tetris_input as input;
pub use lcd_tetris_term as term;
pub use lcd_tetris_types as types;
