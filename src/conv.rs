//! Zero-padded "same" convolution in one and two dimensions.
//!
//! Both functions compute a correlation (the kernel is not flipped), which
//! is the usual convention in signal and image benchmarks. Output has the
//! same shape as the input; the input is padded with `k / 2` zeros on every
//! side so an odd-sized kernel is centred on each output sample.

use crate::error::{KernelError, Result};

/// Rectangular row-major grid of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(KernelError::InvalidLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Every row must be as long as the first one.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(KernelError::InvalidLength {
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> f64 {
        self.data[r * self.cols + c]
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

pub fn convolution_1d(data: &[f64], kernel: &[f64]) -> Vec<f64> {
    let len = data.len();
    let k = kernel.len();
    let mut out = vec![0.0; len];
    if len == 0 || k == 0 {
        return out;
    }

    let pad = k / 2;
    let mut padded = vec![0.0; len + 2 * pad];
    padded[pad..pad + len].copy_from_slice(data);

    for (i, slot) in out.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (p, w) in padded[i..i + k].iter().zip(kernel) {
            sum += p * w;
        }
        *slot = sum;
    }
    out
}

/// 2D correlation of `image` with a square `kernel`.
pub fn convolution_2d(image: &Grid, kernel: &Grid) -> Result<Grid> {
    if kernel.rows != kernel.cols {
        return Err(KernelError::NotSquare {
            rows: kernel.rows,
            cols: kernel.cols,
        });
    }
    let (rows, cols) = (image.rows, image.cols);
    if rows == 0 {
        return Ok(Grid::zeros(0, 0));
    }
    let mut out = Grid::zeros(rows, cols);
    let k = kernel.rows;
    if k == 0 {
        return Ok(out);
    }

    let pad = k / 2;
    let padded_cols = cols + 2 * pad;
    let mut padded = vec![0.0; (rows + 2 * pad) * padded_cols];
    for r in 0..rows {
        let dst = (r + pad) * padded_cols + pad;
        padded[dst..dst + cols].copy_from_slice(&image.data[r * cols..(r + 1) * cols]);
    }

    for r in 0..rows {
        for c in 0..cols {
            let mut sum = 0.0;
            for kr in 0..k {
                let base = (r + kr) * padded_cols + c;
                let window = &padded[base..base + k];
                let weights = &kernel.data[kr * k..(kr + 1) * k];
                for (p, w) in window.iter().zip(weights) {
                    sum += p * w;
                }
            }
            out.data[r * cols + c] = sum;
        }
    }
    Ok(out)
}
