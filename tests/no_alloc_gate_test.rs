use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::Result;

use lcd_tetris::core::{GameSession, Screen, SessionSnapshot, SimpleRng};
use lcd_tetris::engine::{Audio, InputSource, Runner};
use lcd_tetris::term::{FrameBuffer, LcdDisplay, LcdView, Viewport};
use lcd_tetris::types::{Button, SoundEvent};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

const SCRIPT: [Button; 8] = [
    Button::Left,
    Button::None,
    Button::Rotate,
    Button::None,
    Button::Right,
    Button::Right,
    Button::None,
    Button::Drop,
];

struct LoopInput(usize);

impl InputSource for LoopInput {
    fn poll(&mut self) -> Result<Button> {
        let button = SCRIPT[self.0 % SCRIPT.len()];
        self.0 = self.0.wrapping_add(1);
        Ok(button)
    }
}

struct SilentAudio(usize);

impl Audio for SilentAudio {
    fn play(&mut self, _event: SoundEvent) -> Result<()> {
        self.0 += 1;
        Ok(())
    }
}

#[test]
fn session_hot_paths_do_not_allocate() {
    let mut rng = SimpleRng::new(1);
    let mut session = GameSession::new();
    session.start(&mut rng);
    let mut screen = Screen::new();

    // Warm-up.
    session.tick(&mut rng);
    let _ = session.render_into(&mut screen);

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            session.tick(&mut rng);
        }

        for _ in 0..50 {
            session.apply_button(Button::Left, &mut rng);
            session.apply_button(Button::Right, &mut rng);
            session.apply_button(Button::Rotate, &mut rng);
            let _ = session.render_into(&mut screen);
        }

        // Drop drives merge, row clears and spawning
        for _ in 0..40 {
            session.apply_button(Button::Drop, &mut rng);
            let _ = session.take_events();
            if session.game_over() {
                session.restart(&mut rng);
            }
        }
    });

    assert_eq!(allocs, 0);
}

#[test]
fn runner_frame_does_not_allocate() {
    let mut runner = Runner::new(SimpleRng::new(7));
    let mut lcd = LcdDisplay::new();
    let mut input = LoopInput(0);
    let mut audio = SilentAudio(0);
    runner.boot(&mut lcd, &mut audio).unwrap();

    let view = LcdView::new();
    let viewport = Viewport::new(120, 40);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut snap = SessionSnapshot::default();

    // Warm-up.
    runner.step(&mut lcd, &mut input, &mut audio).unwrap();
    view.render_into(&lcd, &snap, viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for _ in 0..500 {
            if runner.step(&mut lcd, &mut input, &mut audio).is_err() {
                break;
            }
            runner.snapshot_into(&mut snap);
            view.render_into(&lcd, &snap, viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
    assert!(audio.0 > 1);
}
