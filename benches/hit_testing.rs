//! Criterion benchmarks for performance-critical hot paths
//!
//! Covers: keyboard hit testing and the full per-sample path through the
//! gesture emitter.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use airtype::gesture::emitter::{EmitterConfig, GestureKeyEmitter};
use airtype::gesture::sample::PositionSample;
use airtype::layout::geometry::Point;
use airtype::layout::keyboard::{KeyboardLayout, LayoutSpec};
use airtype::time::timebase::{Interval, Timestamp};

fn layout() -> KeyboardLayout {
    KeyboardLayout::build(&LayoutSpec::default()).expect("default layout is valid")
}

// ---------------------------------------------------------------------------
// Hit testing benchmarks
// ---------------------------------------------------------------------------

fn bench_resolve_hit(c: &mut Criterion) {
    let layout = layout();
    // Center of the last key, the worst case for the linear scan
    let slot = layout.slots().last().unwrap();
    let p = slot.rect.center();

    c.bench_function("resolve_hit_last_key", |b| {
        b.iter(|| layout.resolve(black_box(p.x), black_box(p.y)))
    });
}

fn bench_resolve_miss(c: &mut Criterion) {
    let layout = layout();

    c.bench_function("resolve_miss", |b| {
        b.iter(|| layout.resolve(black_box(10.0), black_box(10.0)))
    });
}

fn bench_resolve_sweep(c: &mut Criterion) {
    let layout = layout();

    // Sweep a grid across the whole keyboard area, mixing hits and margins
    c.bench_function("resolve_grid_sweep", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            let mut y = 440.0;
            while y < 720.0 {
                let mut x = 140.0;
                while x < 860.0 {
                    if layout.resolve(black_box(x), black_box(y)).is_some() {
                        hits += 1;
                    }
                    x += 17.0;
                }
                y += 13.0;
            }
            hits
        })
    });
}

// ---------------------------------------------------------------------------
// Emitter benchmarks
// ---------------------------------------------------------------------------

fn bench_emitter_sample_stream(c: &mut Criterion) {
    let layout = layout();

    // A hover-press-release cycle over the Q key, spaced past the debounce
    let tip = Point::new(175.0, 475.0);
    let open = Point::new(115.0, 515.0);
    let step = Interval::from_millis(600);

    c.bench_function("emitter_press_cycle", |b| {
        b.iter(|| {
            let mut emitter = GestureKeyEmitter::new(EmitterConfig::default());
            let mut clock = Timestamp::from_millis(600);
            for _ in 0..32 {
                emitter.process_sample(
                    &PositionSample::new(black_box(tip), black_box(open), clock),
                    &layout,
                );
                emitter.process_sample(
                    &PositionSample::new(black_box(tip), black_box(tip), clock),
                    &layout,
                );
                clock = clock + step;
            }
            emitter.char_count()
        })
    });
}

fn bench_emitter_idle_hover(c: &mut Criterion) {
    let layout = layout();
    let tip = Point::new(175.0, 475.0);
    let open = Point::new(115.0, 515.0);

    c.bench_function("emitter_idle_hover", |b| {
        let mut emitter = GestureKeyEmitter::new(EmitterConfig::default());
        let sample = PositionSample::new(tip, open, Timestamp::from_millis(100));
        b.iter(|| emitter.process_sample(black_box(&sample), &layout))
    });
}

criterion_group!(
    benches,
    bench_resolve_hit,
    bench_resolve_miss,
    bench_resolve_sweep,
    bench_emitter_sample_stream,
    bench_emitter_idle_hover
);
criterion_main!(benches);
