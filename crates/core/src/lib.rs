//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the rules of a miniature falling-block game that runs on a
//! 2x16 character LCD turned on its side. The playfield is 4 columns by 16
//! rows, pieces fit in a 2x2 box, and the whole state fits in a few dozen
//! bytes. Nothing here touches the terminal, the clock or the speaker:
//!
//! - **Deterministic**: the piece sequence comes from a [`rng::RandomSource`]
//! - **Allocation-free**: fixed arrays and `arrayvec` on every hot path
//! - **Portable**: front ends read [`snapshot::SessionSnapshot`] and
//!   [`glyph::Screen`] values
//!
//! # Module Structure
//!
//! - [`playfield`]: walled 6-bit row words, collision, merge and row collapse
//! - [`pieces`]: the four-shape catalog and the 2x2 rotation transform
//! - [`level`]: fall delay and the rows-to-clear countdown per level
//! - [`glyph`]: folds playfield and piece bits into eight custom characters
//! - [`game_state`]: the single game session tying it all together
//! - [`rng`]: piece selection randomness
//!
//! # Example
//!
//! ```
//! use lcd_tetris_core::{GameSession, SimpleRng};
//! use lcd_tetris_types::{Button, SoundEvent};
//!
//! let mut rng = SimpleRng::new(12345);
//! let mut session = GameSession::new();
//! session.start(&mut rng);
//!
//! session.apply_button(Button::Left, &mut rng);
//! session.apply_button(Button::Drop, &mut rng);
//!
//! assert_eq!(session.take_events().first(), Some(&SoundEvent::Start));
//! assert_eq!(session.pieces(), 2);
//! ```

pub mod game_state;
pub mod glyph;
pub mod level;
pub mod pieces;
pub mod playfield;
pub mod rng;
pub mod snapshot;

pub use lcd_tetris_types as types;

// Re-export commonly used types for convenience
pub use game_state::{Events, GameSession};
pub use glyph::{render, render_into, Glyph, GlyphError, Screen, GLYPH_BITMAPS};
pub use level::LevelTracker;
pub use pieces::{get_shape, rotate, try_rotate, ActivePiece, Shape, PIECES};
pub use playfield::{ClearedRows, Playfield};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use snapshot::SessionSnapshot;
