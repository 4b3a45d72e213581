//! Scalar implementation with 4x loop unrolling.
//!
//! Four independent accumulators break the add dependency chain so the CPU
//! can overlap iterations. The partial sums are combined pairwise at the end,
//! so results differ from the reference in the last bits.

/// Compute the dot product with 4x loop unrolling.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn sdot_unrolled(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let mut a_chunks = a.chunks_exact(4);
    let mut b_chunks = b.chunks_exact(4);

    let mut sums = [0.0f32; 4];
    for (ca, cb) in (&mut a_chunks).zip(&mut b_chunks) {
        sums[0] += ca[0] * cb[0];
        sums[1] += ca[1] * cb[1];
        sums[2] += ca[2] * cb[2];
        sums[3] += ca[3] * cb[3];
    }

    for (x, y) in a_chunks.remainder().iter().zip(b_chunks.remainder()) {
        sums[0] += x * y;
    }

    (sums[0] + sums[1]) + (sums[2] + sums[3])
}
