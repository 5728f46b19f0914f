use energy_kernels::{
    Body, FftStrategy, InitBounds, KernelError, Matrix, MatmulStrategy, StepParams, dft_naive,
    fft_cooley_tukey, fft_iterative, initialize_bodies, inverse, matmul, matmul_naive, nbody_step,
    random_signal, transform,
};
use num_complex::Complex64;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[test]
fn identity_squared_is_identity() {
    let i2 = Matrix::from_rows(&[[1.0, 0.0], [0.0, 1.0]]).unwrap();
    let c = matmul_naive(&i2, &i2).unwrap();
    assert_eq!(c.to_rows(), vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[test]
fn impulse_dft_is_flat() {
    let x = [
        Complex64::new(1.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
    ];
    assert_eq!(dft_naive(&x), vec![Complex64::new(1.0, 0.0); 4]);
}

#[test]
fn every_matmul_strategy_agrees() {
    let mut rng = seeded_rng(42);
    let n = 65;
    let a = Matrix::random(n, &mut rng);
    let b = Matrix::random(n, &mut rng);
    let expected = matmul(&a, &b, MatmulStrategy::Naive).unwrap();

    for strategy in [
        MatmulStrategy::Blocked { block_size: 1 },
        MatmulStrategy::Blocked { block_size: 10 },
        MatmulStrategy::Blocked { block_size: 64 },
        MatmulStrategy::Blocked { block_size: n },
        MatmulStrategy::Transposed,
        MatmulStrategy::Parallel,
    ] {
        let got = matmul(&a, &b, strategy).unwrap();
        for (x, y) in expected.as_slice().iter().zip(got.as_slice()) {
            assert!((x - y).abs() <= 1e-9 * x.abs().max(1.0), "{strategy:?}: {x} vs {y}");
        }
    }
}

#[test]
fn matmul_rejects_mismatched_operands() {
    let err = matmul(&Matrix::zeros(2), &Matrix::zeros(3), MatmulStrategy::default()).unwrap_err();
    assert_eq!(err, KernelError::DimensionMismatch { lhs: 2, rhs: 3 });
    assert_eq!(err.to_string(), "dimension mismatch: lhs is 2x2, rhs is 3x3");
}

#[test]
fn fast_transforms_delegate_on_odd_lengths() {
    let mut rng = seeded_rng(3);
    for n in [5usize, 10] {
        let x = random_signal(n, &mut rng);
        let naive = dft_naive(&x);
        assert_eq!(fft_cooley_tukey(&x), naive);
        assert_eq!(fft_iterative(&x), naive);
    }
}

#[test]
fn round_trip_through_every_strategy() {
    let mut rng = seeded_rng(11);
    let x = random_signal(256, &mut rng);
    for strategy in [FftStrategy::Naive, FftStrategy::Recursive, FftStrategy::Iterative] {
        let back = inverse(&transform(&x, strategy), strategy);
        for (p, q) in x.iter().zip(&back) {
            assert!((*p - *q).norm() < 1e-9, "{strategy:?}");
        }
    }
}

#[test]
fn symmetric_pair_accelerates_inward() {
    let bodies = vec![
        Body::new(0.0, 0.0, 0.0, 0.0, 1.0e10),
        Body::new(3.0, 4.0, 0.0, 0.0, 1.0e10),
    ];
    let dt = 1.0;
    let next = nbody_step(&bodies, dt, StepParams::default()).unwrap();

    let toward = bodies[1].x - bodies[0].x;
    let a0 = next[0].v;
    let a1 = next[1].v;
    assert!(a0.dot(&toward) > 0.0);
    assert!(a1.dot(&toward) < 0.0);
    assert!((a0.norm() - a1.norm()).abs() <= 1e-12 * a0.norm());
    // Parallel to the separation: cross product vanishes.
    assert!((a0.x * toward.y - a0.y * toward.x).abs() <= 1e-12 * a0.norm());
}

#[test]
fn seeded_fixture_steps_deterministically() {
    let bodies = initialize_bodies(64, InitBounds::default(), &mut seeded_rng(8)).unwrap();
    let once = nbody_step(&bodies, 0.01, StepParams::default()).unwrap();
    let again = nbody_step(&bodies, 0.01, StepParams::default()).unwrap();
    assert_eq!(once, again);
    assert_eq!(once.len(), bodies.len());
}
