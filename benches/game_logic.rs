use anyhow::Result;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lcd_tetris::core::{rotate, GameSession, Playfield, Screen, SimpleRng, PIECES};
use lcd_tetris::engine::{Audio, InputSource, Runner};
use lcd_tetris::term::{FrameBuffer, LcdDisplay, LcdView, Viewport};
use lcd_tetris::types::{Button, SoundEvent};

fn bench_collides(c: &mut Criterion) {
    let mut field = Playfield::new();
    field.set_row(15, 0b011010);
    field.set_row(14, 0b000100);

    c.bench_function("collides_all_anchors", |b| {
        b.iter(|| {
            let mut hits = 0u32;
            for shape in PIECES {
                for row in 0..16 {
                    for col in -1..5 {
                        hits += field.collides(black_box(shape), row, col) as u32;
                    }
                }
            }
            hits
        })
    });
}

fn bench_merge_clear(c: &mut Criterion) {
    c.bench_function("merge_clear_2_rows", |b| {
        b.iter(|| {
            let mut field = Playfield::new();
            field.set_row(14, 0b111001);
            field.set_row(15, 0b111001);
            field.merge(black_box(PIECES[3]), 14, 0)
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    c.bench_function("rotate", |b| {
        b.iter(|| {
            let mut shape = black_box(PIECES[2]);
            for _ in 0..4 {
                shape = rotate(shape);
            }
            shape
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut session = GameSession::new();
    session.start(&mut rng);
    session.playfield_mut().set_row(15, 0b010110);
    let mut screen = Screen::new();

    c.bench_function("render_into", |b| {
        b.iter(|| session.render_into(black_box(&mut screen)))
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut session = GameSession::new();
    session.start(&mut rng);

    c.bench_function("session_tick", |b| {
        b.iter(|| {
            if session.game_over() {
                session.restart(&mut rng);
            }
            session.tick(&mut rng);
            session.take_events()
        })
    });
}

struct Cycle(u8);

impl InputSource for Cycle {
    fn poll(&mut self) -> Result<Button> {
        self.0 = self.0.wrapping_add(1);
        Ok(match self.0 % 6 {
            0 => Button::Left,
            2 => Button::Rotate,
            4 => Button::Drop,
            _ => Button::None,
        })
    }
}

struct Quiet;

impl Audio for Quiet {
    fn play(&mut self, _event: SoundEvent) -> Result<()> {
        Ok(())
    }
}

fn bench_frame(c: &mut Criterion) {
    let mut runner = Runner::new(SimpleRng::new(12345));
    let mut lcd = LcdDisplay::new();
    let mut input = Cycle(0);
    let _ = runner.boot(&mut lcd, &mut Quiet);

    let view = LcdView::new();
    let viewport = Viewport::new(120, 40);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    c.bench_function("runner_frame_and_view", |b| {
        b.iter(|| {
            let _ = runner.step(&mut lcd, &mut input, &mut Quiet);
            let snap = runner.session().snapshot();
            view.render_into(&lcd, &snap, viewport, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_collides,
    bench_merge_clear,
    bench_rotate,
    bench_render,
    bench_tick,
    bench_frame
);
criterion_main!(benches);
