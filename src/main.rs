//! LCD Tetris runner (default binary).
//!
//! Plays the game on an emulated 2x16 character LCD drawn in the terminal.
//! Configuration comes from `LCD_TETRIS_*` environment variables; see
//! [`EngineConfig`](lcd_tetris::engine::EngineConfig).

use std::fs::File;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};

use lcd_tetris::core::{SessionSnapshot, SimpleRng};
use lcd_tetris::engine::{Audio, EngineConfig, Runner};
use lcd_tetris::input::TerminalInput;
use lcd_tetris::term::{
    BellAudio, FrameBuffer, LcdDisplay, LcdView, MuteAudio, TerminalRenderer, Viewport,
};

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    init_logging(&config)?;
    log::info!(
        "starting: seed={} frame_ms={} mute={}",
        config.seed,
        config.frame_ms,
        config.mute
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        log::warn!("failed to restore terminal: {}", e);
    }
    if let Err(e) = &result {
        log::error!("exiting on error: {:#}", e);
    }
    result
}

/// Logs go to a file only; the terminal is in raw mode.
fn init_logging(config: &EngineConfig) -> Result<()> {
    let Some(path) = config.log_path.as_deref() else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("opening log file {}", path))?;
    env_logger::Builder::new()
        .parse_filters(&config.log_filter)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &EngineConfig) -> Result<()> {
    let mut runner = Runner::new(SimpleRng::new(config.seed));
    let mut lcd = LcdDisplay::new();
    let mut input = TerminalInput::new(config.key_release_ms);
    let mut audio: Box<dyn Audio> = if config.mute {
        Box::new(MuteAudio)
    } else {
        Box::new(BellAudio::stdout())
    };

    runner.boot(&mut lcd, &mut audio)?;

    let view = LcdView::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = SessionSnapshot::default();
    let frame = config.frame_duration();

    loop {
        let frame_start = Instant::now();

        runner.step(&mut lcd, &mut input, &mut audio)?;
        if input.quit_requested() {
            log::info!(
                "quit after {} frames, {} lines",
                runner.frames(),
                runner.session().lines()
            );
            return Ok(());
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        runner.snapshot_into(&mut snap);
        view.render_into(&lcd, &snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if let Some(rest) = frame.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}
