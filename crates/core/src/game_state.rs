//! Game state module - the single game-session context
//!
//! This module ties together the playfield, the piece catalog, the level
//! tracker and the glyph compositor. It owns the active piece and handles
//! spawning, gravity, player moves, lock-in, line clears and game over.
//! It performs no I/O: sound events are queued and drained by the caller.

use arrayvec::ArrayVec;

use crate::glyph::{self, GlyphError, Screen};
use crate::level::LevelTracker;
use crate::pieces::{try_rotate, ActivePiece, PIECES};
use crate::playfield::Playfield;
use crate::rng::RandomSource;
use crate::types::{Button, SoundEvent, PATTERN_COUNT, PLAYFIELD_ROWS};

/// Events queued between two drains: room for every playable row clearing at
/// once plus the level-ups, start and game over that can share a frame
pub const EVENT_CAPACITY: usize = 2 * PLAYFIELD_ROWS;

pub type Events = ArrayVec<SoundEvent, EVENT_CAPACITY>;

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameSession {
    playfield: Playfield,
    levels: LevelTracker,
    active: Option<ActivePiece>,
    /// Frames since the active piece last fell
    fall_timer: u8,
    lines: u32,
    pieces: u32,
    started: bool,
    game_over: bool,
    events: Events,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            playfield: Playfield::new(),
            levels: LevelTracker::new(),
            active: None,
            fall_timer: 0,
            lines: 0,
            pieces: 0,
            started: false,
            game_over: false,
            events: Events::new(),
        }
    }

    /// Start the session and spawn the first piece
    pub fn start(&mut self, rng: &mut impl RandomSource) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.push_event(SoundEvent::Start);
        log::info!("session started");
        self.spawn_piece(rng)
    }

    /// Empty playfield, first level, no active piece, not started
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Reset and start again
    pub fn restart(&mut self, rng: &mut impl RandomSource) -> bool {
        self.reset();
        self.start(rng)
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn levels(&self) -> &LevelTracker {
        &self.levels
    }

    /// Rows cleared this session
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Pieces spawned this session
    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    /// Mutable playfield access for scripted setups and tests
    pub fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.playfield
    }

    /// Replace the active piece for scripted setups and tests
    pub fn set_active(&mut self, piece: Option<ActivePiece>) {
        self.active = piece;
    }

    /// Spawn a random catalog piece at the spawn anchor.
    ///
    /// Returns false and ends the session if the spawn position is blocked.
    pub fn spawn_piece(&mut self, rng: &mut impl RandomSource) -> bool {
        let index = rng.next(PATTERN_COUNT as u32) as usize;
        let piece = ActivePiece::spawn(PIECES[index % PATTERN_COUNT]);

        self.fall_timer = 0;
        if self.playfield.collides(piece.shape, piece.row, piece.col) {
            self.active = None;
            self.game_over = true;
            self.push_event(SoundEvent::GameOver);
            log::info!(
                "game over after {} pieces, {} lines",
                self.pieces,
                self.lines
            );
            return false;
        }

        self.active = Some(piece);
        self.pieces = self.pieces.wrapping_add(1);
        true
    }

    /// Try to move the active piece by (`drow`, `dcol`)
    pub fn try_move(&mut self, drow: i8, dcol: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.offset(drow, dcol);
        if self.playfield.collides(moved.shape, moved.row, moved.col) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    /// Try to rotate the active piece in place
    pub fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotated = try_rotate(active.shape, active.row, active.col, |s, r, c| {
            self.playfield.collides(s, r, c)
        });

        match rotated {
            Some(shape) => {
                self.active = Some(active.with_shape(shape));
                true
            }
            None => false,
        }
    }

    /// Drop the active piece to the lowest free row and lock it
    pub fn hard_drop(&mut self, rng: &mut impl RandomSource) -> bool {
        if self.active.is_none() {
            return false;
        }
        while self.try_move(1, 0) {}
        self.lock_piece(rng);
        true
    }

    /// Lock the active piece into the playfield, count cleared rows and spawn
    /// the next piece
    pub fn lock_piece(&mut self, rng: &mut impl RandomSource) {
        let Some(active) = self.active.take() else {
            return;
        };

        let cleared = self.playfield.merge(active.shape, active.row, active.col);
        for row in cleared {
            self.lines = self.lines.wrapping_add(1);
            self.push_event(SoundEvent::LineCleared);
            log::debug!("row {} cleared ({} total)", row, self.lines);

            if self.levels.on_line_cleared() {
                self.push_event(SoundEvent::LevelUp);
            }
        }

        self.spawn_piece(rng);
    }

    /// Advance gravity by one frame.
    ///
    /// The piece falls once every `delay + 1` frames, or locks if the row
    /// below is blocked. Returns true if the piece fell or locked.
    pub fn tick(&mut self, rng: &mut impl RandomSource) -> bool {
        if !self.playable() || self.active.is_none() {
            return false;
        }

        self.fall_timer = self.fall_timer.saturating_add(1);
        if self.fall_timer <= self.levels.delay() {
            return false;
        }
        self.fall_timer = 0;

        if !self.try_move(1, 0) {
            self.lock_piece(rng);
        }
        true
    }

    /// Apply one input button. Returns true if the state changed.
    pub fn apply_button(&mut self, button: Button, rng: &mut impl RandomSource) -> bool {
        if !self.playable() {
            return false;
        }

        match button {
            Button::None => false,
            // Columns grow leftward
            Button::Left => self.try_move(0, 1),
            Button::Right => self.try_move(0, -1),
            Button::Rotate => self.try_rotate(),
            Button::Drop => self.hard_drop(rng),
        }
    }

    /// Take all queued sound events
    pub fn take_events(&mut self) -> Events {
        std::mem::take(&mut self.events)
    }

    fn push_event(&mut self, event: SoundEvent) {
        if self.events.try_push(event).is_err() {
            log::warn!("event queue full, dropping {}", event.as_str());
        }
    }

    /// Compose the display image for the current state
    pub fn render_into(&self, out: &mut Screen) -> Result<(), GlyphError> {
        glyph::render_into(&self.playfield, self.active, out)
    }

    pub fn snapshot_into(&self, out: &mut crate::snapshot::SessionSnapshot) {
        out.playfield = *self.playfield.rows();
        out.active = self.active;
        out.level = self.levels.level() as u8;
        out.delay = self.levels.delay();
        out.rows_remaining = self.levels.rows_remaining();
        out.lines = self.lines;
        out.pieces = self.pieces;
        out.started = self.started;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> crate::snapshot::SessionSnapshot {
        let mut s = crate::snapshot::SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
