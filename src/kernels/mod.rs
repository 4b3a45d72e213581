//! # Dot Product Kernels
//!
//! Every kernel computes the single-precision dot product
//!
//! `sdot(n, a, b) = Σ a[i] * b[i]` for `i` in `[0, n)`
//!
//! ## Accumulation order
//!
//! The reference kernel accumulates sequentially in index order. Kernels that
//! keep that order (`x86_64-asm`, `c-reference`) are bit-identical to it.
//! Unrolled and SIMD kernels split the sum into several partial accumulators,
//! which changes the low bits; they are checked against the reference with a
//! relative tolerance (see [`crate::sanity`]).

pub mod code;
#[cfg(test)]
mod test;

pub use code::*;
