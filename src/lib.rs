//! Numerical kernels for time and energy comparison runs.
//!
//! Every kernel is a pure, synchronous function: it borrows fully built input,
//! allocates its own scratch space, and returns a freshly owned result. Each
//! comes in several named strategies so a measurement harness can run the same
//! logical operation with different memory-access patterns.
//!
//! # Kernels
//!
//! - **Matrix multiply** ([`matmul_naive`], [`matmul_blocked`], [`matmul_transpose`],
//!   [`matmul_parallel`]) — square `f64` matrices
//! - **Fourier transform** ([`dft_naive`], [`fft_cooley_tukey`], [`fft_iterative`],
//!   [`inverse`]) — complex sequences, power-of-two fast paths
//! - **N-body** ([`nbody_step`], [`nbody_step_parallel`], [`initialize_bodies`]) —
//!   softened direct-sum gravity, one semi-implicit Euler step
//! - **Convolution** ([`convolution_1d`], [`convolution_2d`]) — zero-padded "same" output
//!
//! Random fixtures ([`Matrix::random`], [`random_signal`], [`initialize_bodies`])
//! take the random source as an argument; nothing in this crate keeps global
//! RNG state.

mod conv;
mod error;
mod fft;
mod matmul;
mod nbody;

pub use conv::*;
pub use error::*;
pub use fft::*;
pub use matmul::*;
pub use nbody::*;
