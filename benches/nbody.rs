use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use energy_kernels::{InitBounds, StepParams, initialize_bodies, nbody_step, nbody_step_parallel};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const BODY_COUNTS: &[(&str, usize)] = &[("n100", 100), ("n500", 500), ("n1500", 1500)];
const DT: f64 = 0.01;

fn bench_nbody(c: &mut Criterion) {
    let bounds = InitBounds::default();
    let params = StepParams::default();

    let mut group = c.benchmark_group("nbody_step");
    for &(label, n) in BODY_COUNTS {
        // Pairwise interactions per step.
        group.throughput(Throughput::Elements((n as u64) * (n as u64)));

        let mut rng = ChaCha8Rng::seed_from_u64(0x9E37_79B9_7F4A_7C15 ^ n as u64);
        let bodies = initialize_bodies(n, bounds, &mut rng).unwrap();

        group.bench_function(BenchmarkId::new("sequential", label), |b| {
            b.iter(|| black_box(nbody_step(black_box(&bodies), DT, params).unwrap()));
        });
        group.bench_function(BenchmarkId::new("parallel", label), |b| {
            b.iter(|| black_box(nbody_step_parallel(black_box(&bodies), DT, params).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nbody);
criterion_main!(benches);
