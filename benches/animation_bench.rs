#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio_motion::choreographer::{Choreographer, PageLayout};
use folio_motion::effects::{DriftGenerator, DriftRange};
use folio_motion::options::MotionOptions;
use folio_motion::surface::{ElementId, Rect, RecordingSurface, Viewport};
use folio_motion::util::easing::EasingFunction;
use web_time::{Duration, Instant};

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::SineInOut;
    let _ = c.bench_function("sine_in_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))));
    });
}

fn drift_benchmark(c: &mut Criterion) {
    let mut generator = DriftGenerator::from_seed(7);
    let range = DriftRange::default();
    let _ = c.bench_function("drift_generate", |b| {
        b.iter(|| black_box(generator.generate(black_box(&range))));
    });
}

/// A hero plus `count` cards, each revealed, parallaxed and floating.
fn page(count: u32) -> (PageLayout, RecordingSurface) {
    let mut surface = RecordingSurface::new(Viewport::new(1280.0, 800.0));
    let hero: &[(&str, &str)] = &[("data-hero-root", "")];
    let card: &[(&str, &str)] = &[
        ("data-animate-direction", "up"),
        ("data-animate-group", "cards"),
        ("data-parallax", "medium"),
        ("data-float", "low"),
    ];
    surface.set_bounds(ElementId(0), Rect::new(0.0, 0.0, 1280.0, 800.0));
    let mut elements = vec![(ElementId(0), hero)];
    for i in 1..=count {
        let id = ElementId(i);
        let row = (i / 4) as f32;
        let col = (i % 4) as f32;
        surface.set_bounds(id, Rect::new(col * 300.0, 200.0 + row * 400.0, 260.0, 360.0));
        elements.push((id, card));
    }
    (PageLayout::scan(elements), surface)
}

fn choreographer_frame_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("choreographer_frame");

    for count in [10, 50, 200] {
        let (layout, mut surface) = page(count);
        let mut choreographer = Choreographer::with_seed(MotionOptions::default(), 1);
        let t0 = Instant::now();
        let _ = choreographer.mount(&layout, t0, &mut surface);
        let _ = choreographer.skip_intro(t0, &mut surface);

        let step = Duration::from_millis(16);
        let mut now = t0;
        let _ = group.bench_function(format!("{count}_elements"), |b| {
            b.iter(|| {
                now += step;
                black_box(choreographer.frame(now, &mut surface))
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    easing_benchmark,
    drift_benchmark,
    choreographer_frame_benchmark
);
criterion_main!(benches);
