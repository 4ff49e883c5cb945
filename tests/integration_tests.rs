//! Integration tests for the session and the frame runner

use anyhow::Result;

use lcd_tetris::core::{ActivePiece, GameSession, LevelTracker, ScriptedRng, PIECES};
use lcd_tetris::engine::{Audio, InputSource, Runner};
use lcd_tetris::term::LcdDisplay;
use lcd_tetris::types::{Button, SoundEvent, LEVELS, LEVEL_COUNT, WALL_ROW};

struct Script(Vec<Button>);

impl InputSource for Script {
    fn poll(&mut self) -> Result<Button> {
        Ok(if self.0.is_empty() {
            Button::None
        } else {
            self.0.remove(0)
        })
    }
}

#[derive(Default)]
struct Recorder(Vec<SoundEvent>);

impl Audio for Recorder {
    fn play(&mut self, event: SoundEvent) -> Result<()> {
        self.0.push(event);
        Ok(())
    }
}

#[test]
fn test_session_lifecycle() {
    let mut rng = ScriptedRng::new([0, 1, 2, 3]);
    let mut session = GameSession::new();
    assert!(!session.started());

    session.start(&mut rng);
    assert!(session.started());
    assert!(session.active().is_some());
    assert!(!session.game_over());

    // Fill the field with drops until it tops out
    for _ in 0..200 {
        if session.game_over() {
            break;
        }
        session.apply_button(Button::Drop, &mut rng);
    }
    assert!(session.game_over());
    let events = session.take_events();
    assert_eq!(events.first(), Some(&SoundEvent::Start));
    assert_eq!(events.last(), Some(&SoundEvent::GameOver));
}

#[test]
fn test_two_row_clear_feeds_tracker_twice_in_order() {
    let mut rng = ScriptedRng::new([0]);
    let mut session = GameSession::new();
    session.start(&mut rng);
    session.take_events();

    session.playfield_mut().set_row(14, 0b111001);
    session.playfield_mut().set_row(15, 0b111001);
    session.set_active(Some(ActivePiece::new(PIECES[3], 0, 0)));
    session.apply_button(Button::Drop, &mut rng);

    let events = session.take_events();
    assert_eq!(
        events.as_slice(),
        &[SoundEvent::LineCleared, SoundEvent::LineCleared]
    );
    assert_eq!(session.lines(), 2);

    let mut expected = LevelTracker::new();
    expected.on_line_cleared();
    expected.on_line_cleared();
    assert_eq!(session.levels(), &expected);
}

#[test]
fn test_level_progression_reaches_terminal_speed() {
    let mut rng = ScriptedRng::new([0]);
    let mut session = GameSession::new();
    session.start(&mut rng);
    session.take_events();

    let total: u32 = LEVELS.iter().map(|l| l.rows as u32).sum();
    let mut level_ups = 0;
    for _ in 0..total + 5 {
        session.playfield_mut().set_row(15, 0b111100);
        session.set_active(Some(ActivePiece::new(PIECES[0], 10, 0)));
        session.apply_button(Button::Drop, &mut rng);
        level_ups += session
            .take_events()
            .iter()
            .filter(|e| **e == SoundEvent::LevelUp)
            .count();
    }

    assert_eq!(level_ups, LEVEL_COUNT - 1);
    assert!(session.levels().is_terminal());
    assert_eq!(session.levels().delay(), 0);
}

#[test]
fn test_runner_drives_lcd_and_audio() {
    let mut runner = Runner::new(ScriptedRng::new([3]));
    let mut lcd = LcdDisplay::new();
    let mut audio = Recorder::default();
    runner.boot(&mut lcd, &mut audio).unwrap();

    // square at col 1 covers cols 1-2: right half of line 1 and left half of line 0
    assert_eq!(lcd.code_at(0, 0), Some(2));
    assert_eq!(lcd.code_at(1, 0), Some(0));
    assert_eq!(lcd.code_at(0, 2), Some(b' '));

    let mut input = Script(vec![Button::Drop]);
    runner.step(&mut lcd, &mut input, &mut audio).unwrap();
    // landed square: rows 14-15 settled
    assert_eq!(lcd.code_at(0, 15), Some(5));
    assert_eq!(lcd.code_at(1, 14), Some(1));
    assert_eq!(runner.session().playfield().row(13), WALL_ROW);
    assert_eq!(audio.0, vec![SoundEvent::Start]);
}

#[test]
fn test_runner_gravity_follows_level_delay() {
    let mut runner = Runner::new(ScriptedRng::new([0]));
    let mut lcd = LcdDisplay::new();
    let mut audio = Recorder::default();
    runner.boot(&mut lcd, &mut audio).unwrap();

    let mut input = Script(Vec::new());
    let delay = runner.session().levels().delay() as usize;
    for _ in 0..(delay + 1) * 3 {
        runner.step(&mut lcd, &mut input, &mut audio).unwrap();
    }
    assert_eq!(runner.session().active().unwrap().row, 3);
    assert_eq!(lcd.code_at(0, 3), Some(2));
}
