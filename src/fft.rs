//! Discrete Fourier transform, `X[k] = sum_n x[n] * e^(-2*pi*i*k*n/N)`.
//!
//! | Function | Strategy | Cost |
//! |----------|----------|------|
//! | [`dft_naive`] | Direct double loop | O(N^2), any N |
//! | [`fft_cooley_tukey`] | Recursive radix-2 split into even/odd halves | O(N log N) |
//! | [`fft_iterative`] | In-place radix-2 after a bit-reversal permutation | O(N log N) |
//!
//! Both fast variants only handle power-of-two lengths. Any other length is
//! handed to [`dft_naive`] unchanged, so their output for such input is
//! exactly the naive output.

use std::f64::consts::PI;

use num_complex::Complex64;
use rand::Rng;
use tracing::{debug, trace};

/// Selects one of the transform variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FftStrategy {
    Naive,
    Recursive,
    #[default]
    Iterative,
}

impl FftStrategy {
    pub fn name(self) -> &'static str {
        match self {
            FftStrategy::Naive => "dft_naive",
            FftStrategy::Recursive => "fft_cooley_tukey",
            FftStrategy::Iterative => "fft_iterative",
        }
    }
}

/// Forward transform with the chosen strategy.
pub fn transform(x: &[Complex64], strategy: FftStrategy) -> Vec<Complex64> {
    trace!(strategy = strategy.name(), len = x.len(), "fft");
    match strategy {
        FftStrategy::Naive => dft_naive(x),
        FftStrategy::Recursive => fft_cooley_tukey(x),
        FftStrategy::Iterative => fft_iterative(x),
    }
}

/// Inverse transform, computed as `conj(F(conj(x))) / N`.
pub fn inverse(x: &[Complex64], strategy: FftStrategy) -> Vec<Complex64> {
    let n = x.len();
    if n == 0 {
        return Vec::new();
    }
    let conjugated: Vec<Complex64> = x.iter().map(Complex64::conj).collect();
    let scale = 1.0 / n as f64;
    transform(&conjugated, strategy)
        .into_iter()
        .map(|v| v.conj() * scale)
        .collect()
}

/// Real and imaginary parts drawn uniformly from `[0, 1)`.
pub fn random_signal<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Complex64> {
    (0..n)
        .map(|_| Complex64::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect()
}

#[inline]
fn twiddle(angle: f64) -> Complex64 {
    Complex64::new(angle.cos(), angle.sin())
}

#[inline]
fn fallback(x: &[Complex64], variant: &'static str) -> Vec<Complex64> {
    debug!(len = x.len(), variant, "length is not a power of two, using naive DFT");
    dft_naive(x)
}

pub fn dft_naive(x: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    let len = n as f64;
    let mut out = Vec::with_capacity(n);
    for k in 0..n {
        let mut s = Complex64::new(0.0, 0.0);
        for (j, &value) in x.iter().enumerate() {
            let angle = -2.0 * PI * k as f64 * j as f64 / len;
            s += value * twiddle(angle);
        }
        out.push(s);
    }
    out
}

/// Recursive radix-2 Cooley-Tukey.
pub fn fft_cooley_tukey(x: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    if n <= 1 {
        return x.to_vec();
    }
    if !n.is_power_of_two() {
        return fallback(x, "fft_cooley_tukey");
    }
    cooley_tukey(x)
}

fn cooley_tukey(x: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    if n <= 1 {
        return x.to_vec();
    }

    let half = n / 2;
    let mut even = Vec::with_capacity(half);
    let mut odd = Vec::with_capacity(half);
    for pair in x.chunks_exact(2) {
        even.push(pair[0]);
        odd.push(pair[1]);
    }

    let even_fft = cooley_tukey(&even);
    let odd_fft = cooley_tukey(&odd);

    let mut out = vec![Complex64::new(0.0, 0.0); n];
    for k in 0..half {
        let w = twiddle(-2.0 * PI * k as f64 / n as f64);
        let t = w * odd_fft[k];
        out[k] = even_fft[k] + t;
        out[k + half] = even_fft[k] - t;
    }
    out
}

/// Iterative in-place radix-2 on a copy of the input.
pub fn fft_iterative(x: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    if n <= 1 {
        return x.to_vec();
    }
    if !n.is_power_of_two() {
        return fallback(x, "fft_iterative");
    }

    let mut out = x.to_vec();
    bit_reverse_permute(&mut out);

    let mut size = 2;
    while size <= n {
        let half = size >> 1;
        let wm = twiddle(-2.0 * PI / size as f64);
        for block in out.chunks_exact_mut(size) {
            let (low, high) = block.split_at_mut(half);
            let mut w = Complex64::new(1.0, 0.0);
            for (lo, hi) in low.iter_mut().zip(high.iter_mut()) {
                let t = w * *hi;
                *hi = *lo - t;
                *lo += t;
                w *= wm;
            }
        }
        size <<= 1;
    }
    out
}

/// Reorders `values` so index `i` holds the element at the bit-reversal of
/// `i`. Length must be a power of two.
fn bit_reverse_permute(values: &mut [Complex64]) {
    let n = values.len();
    let mut j = 0usize;
    for i in 0..n.saturating_sub(1) {
        if i < j {
            values.swap(i, j);
        }
        // Add one to the reversed counter: clear leading set bits, then set
        // the first clear one.
        let mut k = n >> 1;
        while k <= j {
            j -= k;
            k >>= 1;
        }
        j += k;
    }
}
