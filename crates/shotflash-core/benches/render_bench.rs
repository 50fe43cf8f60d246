//! Benchmarks for shot reconstruction and frame rendering
//!
//! Run with: cargo bench -p shotflash-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use shotflash_core::canvas::Canvas;
use shotflash_core::{
    AssetStore, Counts, DEFAULT_SHOT_CAP, FrameRenderer, GateRenderer, Layout, MarkerStyle,
    Playback, Rgb, compact, expand, lookup,
};

fn ghz_counts(width: usize, shots: u64) -> Counts {
    Counts::from_pairs([
        ("0".repeat(width), shots / 2),
        ("1".repeat(width), shots - shots / 2),
    ])
}

/// Benchmark compaction of large shot totals
fn bench_compact(c: &mut Criterion) {
    let mut group = c.benchmark_group("compact");

    for shots in &[1_024_u64, 8_192, 100_000] {
        let counts = ghz_counts(5, *shots);
        group.bench_with_input(BenchmarkId::new("ghz5", shots), &counts, |b, counts| {
            b.iter(|| compact(black_box(counts), DEFAULT_SHOT_CAP));
        });
    }

    group.finish();
}

/// Benchmark expansion into shot lists
fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");

    for width in &[5, 20, 53] {
        let counts = ghz_counts(*width, DEFAULT_SHOT_CAP);
        group.bench_with_input(BenchmarkId::new("ghz", width), &counts, |b, counts| {
            b.iter(|| expand(black_box(counts)));
        });
    }

    group.finish();
}

/// Benchmark rendering one gate-map frame per device
fn bench_gate_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_frame");
    let style = MarkerStyle {
        color: Rgb::WHITE,
        intensity: 0.7,
    };

    for name in &["sparrow", "albatross", "unknown53a"] {
        let device = lookup(name).unwrap();
        let shots = expand(&ghz_counts(device.num_qubits, 10));
        let background = AssetStore::Embedded
            .background(Some(device), Layout::Gate, true, device.gate_size)
            .unwrap();
        let mut renderer =
            GateRenderer::new(device, shots, background, style, Playback::Random).unwrap();
        let mut canvas = Canvas::new(device.gate_size).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        group.bench_function(*name, |b| {
            let mut frame = 0;
            b.iter(|| {
                renderer
                    .render_frame(black_box(frame), &mut canvas, &mut rng)
                    .unwrap();
                frame += 1;
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compact, bench_expand, bench_gate_frame);
criterion_main!(benches);
