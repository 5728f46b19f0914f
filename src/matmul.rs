//! Dense matrix multiplication (C = A x B).
//!
//! All matrices are square `n x n`, `f64`, row-major in one contiguous buffer.
//!
//! # Strategies
//!
//! | Function | Strategy | Best For |
//! |----------|----------|----------|
//! | [`matmul_naive`] | Plain i-j-k loops | Correctness baseline |
//! | [`matmul_blocked`] | Square tiles, `ii-jj-kk` traversal | Larger matrices |
//! | [`matmul_transpose`] | Transpose B for contiguous access | Moderate sizes |
//! | [`matmul_parallel`] | Transposed B, rows split across threads | Many cores |
//!
//! # Cache blocking
//!
//! With `DEFAULT_BLOCK_SIZE = 64` one tile of each operand is
//! 64 x 64 x 8 bytes = 32KB, so the A, B and C tiles together stay within a
//! typical L2. Tiles on the right and bottom edges are clipped to the matrix,
//! never padded.
//!
//! The blocked variant adds partial sums into C one `kk` tile at a time, so
//! its rounding differs from the naive loop. Compare results at full-sum
//! tolerance, not bit for bit.

use std::ops::Index;

use rand::Rng;
use rayon::prelude::*;
use tracing::trace;

use crate::error::{KernelError, Result};

/// Tile edge used when the caller does not pick one.
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// Square row-major matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Wraps a row-major buffer of exactly `n * n` entries.
    pub fn from_vec(n: usize, data: Vec<f64>) -> Result<Self> {
        let expected = n * n;
        if data.len() != expected {
            return Err(KernelError::InvalidLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { n, data })
    }

    /// Builds a matrix from nested rows. Every row must be as long as the
    /// number of rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for row in rows {
            let row = row.as_ref();
            if row.len() != n {
                return Err(KernelError::NotSquare {
                    rows: n,
                    cols: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { n, data })
    }

    /// Entries drawn uniformly from `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let data = (0..n * n).map(|_| rng.gen_range(0.0..1.0)).collect();
        Self { n, data }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.n + j]
    }
}

/// Selects one of the multiply variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatmulStrategy {
    Naive,
    Blocked { block_size: usize },
    Transposed,
    Parallel,
}

impl MatmulStrategy {
    pub fn name(self) -> &'static str {
        match self {
            MatmulStrategy::Naive => "matmul_naive",
            MatmulStrategy::Blocked { .. } => "matmul_blocked",
            MatmulStrategy::Transposed => "matmul_transpose",
            MatmulStrategy::Parallel => "matmul_parallel",
        }
    }
}

impl Default for MatmulStrategy {
    fn default() -> Self {
        MatmulStrategy::Blocked {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

/// Multiplies with the chosen strategy.
pub fn matmul(a: &Matrix, b: &Matrix, strategy: MatmulStrategy) -> Result<Matrix> {
    trace!(strategy = strategy.name(), n = a.n(), "matmul");
    match strategy {
        MatmulStrategy::Naive => matmul_naive(a, b),
        MatmulStrategy::Blocked { block_size } => matmul_blocked(a, b, block_size),
        MatmulStrategy::Transposed => matmul_transpose(a, b),
        MatmulStrategy::Parallel => matmul_parallel(a, b),
    }
}

#[inline]
fn check_dims(a: &Matrix, b: &Matrix) -> Result<usize> {
    if a.n != b.n {
        return Err(KernelError::DimensionMismatch {
            lhs: a.n,
            rhs: b.n,
        });
    }
    Ok(a.n)
}

#[inline]
fn transpose(b: &[f64], n: usize) -> Vec<f64> {
    let mut out = vec![0.0f64; n * n];
    for i in 0..n {
        let row = i * n;
        for j in 0..n {
            out[j * n + i] = b[row + j];
        }
    }
    out
}

#[inline]
fn dot(x: &[f64], y: &[f64]) -> f64 {
    let mut sum = 0.0f64;
    for (p, q) in x.iter().zip(y) {
        sum += p * q;
    }
    sum
}

/// Baseline multiplication (i-j-k order).
pub fn matmul_naive(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let n = check_dims(a, b)?;
    let (a, b) = (a.as_slice(), b.as_slice());
    let mut c = Matrix::zeros(n);
    for i in 0..n {
        let a_row = i * n;
        for j in 0..n {
            let mut sum = 0.0f64;
            for k in 0..n {
                sum += a[a_row + k] * b[k * n + j];
            }
            c.data[a_row + j] = sum;
        }
    }
    Ok(c)
}

/// Tiled multiplication. Each `(ii, jj, kk)` tile adds its partial products
/// into the matching tile of C.
pub fn matmul_blocked(a: &Matrix, b: &Matrix, block_size: usize) -> Result<Matrix> {
    if block_size == 0 {
        return Err(KernelError::InvalidBlockSize(block_size));
    }
    let n = check_dims(a, b)?;
    let (a, b) = (a.as_slice(), b.as_slice());
    let mut c = Matrix::zeros(n);
    let out = &mut c.data;

    for ii in (0..n).step_by(block_size) {
        let i_max = (ii + block_size).min(n);
        for jj in (0..n).step_by(block_size) {
            let j_max = (jj + block_size).min(n);
            for kk in (0..n).step_by(block_size) {
                let k_max = (kk + block_size).min(n);

                for i in ii..i_max {
                    let row = i * n;
                    for j in jj..j_max {
                        let mut sum = out[row + j];
                        for k in kk..k_max {
                            sum += a[row + k] * b[k * n + j];
                        }
                        out[row + j] = sum;
                    }
                }
            }
        }
    }
    Ok(c)
}

/// Multiply with B transposed so the inner loop walks two contiguous rows.
pub fn matmul_transpose(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let n = check_dims(a, b)?;
    let b_t = transpose(b.as_slice(), n);
    let mut c = Matrix::zeros(n);
    for i in 0..n {
        let a_row = a.row(i);
        for j in 0..n {
            c.data[i * n + j] = dot(a_row, &b_t[j * n..(j + 1) * n]);
        }
    }
    Ok(c)
}

/// Same loop as [`matmul_transpose`] with output rows spread over the rayon
/// pool. Every cell is summed in the same order, so the result is identical.
pub fn matmul_parallel(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let n = check_dims(a, b)?;
    let mut c = Matrix::zeros(n);
    if n == 0 {
        return Ok(c);
    }
    let b_t = transpose(b.as_slice(), n);
    c.data
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(i, out_row)| {
            let a_row = a.row(i);
            for (j, cell) in out_row.iter_mut().enumerate() {
                *cell = dot(a_row, &b_t[j * n..(j + 1) * n]);
            }
        });
    Ok(c)
}
