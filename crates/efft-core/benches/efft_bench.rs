//! Benchmarks for incremental spectrum updates
//!
//! Run with: cargo bench -p efft-core --bench efft_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use efft_core::reference::Fft2d;
use efft_core::{EventFft, FrameSize, SpatialGrid, Stimuli, Stimulus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [FrameSize; 4] = [FrameSize::N16, FrameSize::N64, FrameSize::N128, FrameSize::N256];

fn random_stimuli(rng: &mut StdRng, n: usize, count: usize) -> Vec<Stimulus> {
    (0..count)
        .map(|_| Stimulus::new(rng.gen_range(0..n), rng.gen_range(0..n), rng.gen_bool(0.5)))
        .collect()
}

// ============================================================================
// Single Event Updates
// ============================================================================

fn bench_single_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_update");

    for size in SIZES {
        let n = size.value();
        let mut rng = StdRng::seed_from_u64(7);
        let events = random_stimuli(&mut rng, n, 1024);
        let mut efft = EventFft::with_size(size);

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("event", n), &n, |b, _| {
            let mut i = 0;
            b.iter(|| {
                let s = &events[i % events.len()];
                i += 1;
                efft.update(black_box(s))
            })
        });
    }

    group.finish();
}

// ============================================================================
// Full Recompute Baseline
// ============================================================================

fn bench_full_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_recompute");

    for size in SIZES {
        let n = size.value();
        let mut rng = StdRng::seed_from_u64(11);
        let mut grid = SpatialGrid::new(size);
        for s in random_stimuli(&mut rng, n, n * n / 4) {
            grid.write(s.row, s.col, s.state);
        }
        let mut fft = Fft2d::new(size);

        group.bench_with_input(BenchmarkId::new("fft2d", n), &n, |b, _| {
            b.iter(|| fft.transform(black_box(&grid)))
        });
    }

    group.finish();
}

// ============================================================================
// Batch Packets
// ============================================================================

fn bench_batch_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_update");
    let size = FrameSize::N128;
    let n = size.value();

    for packet in [8usize, 64, 256] {
        let mut rng = StdRng::seed_from_u64(packet as u64);
        let packets: Vec<Stimuli> = (0..64)
            .map(|_| random_stimuli(&mut rng, n, packet).into())
            .collect();
        let mut efft = EventFft::with_size(size);

        group.throughput(Throughput::Elements(packet as u64));
        group.bench_with_input(BenchmarkId::new("packet", packet), &packet, |b, _| {
            let mut i = 0;
            b.iter(|| {
                let p = &packets[i % packets.len()];
                i += 1;
                efft.update(black_box(p))
            })
        });
    }

    group.finish();
}

criterion_group!(
    name = update_benches;
    config = Criterion::default();
    targets = bench_single_update, bench_batch_update
);

criterion_group!(
    name = baseline_benches;
    config = Criterion::default();
    targets = bench_full_recompute
);

criterion_main!(update_benches, baseline_benches);
