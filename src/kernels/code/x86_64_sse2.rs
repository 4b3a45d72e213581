//! x86_64 SSE2 SIMD implementation.
//!
//! SSE2 is part of the x86_64 baseline, so this variant is always available
//! on that architecture. Four lanes accumulate independently.

use std::arch::x86_64::*;

/// Compute the dot product using SSE2, 4 floats per iteration.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn sdot_x86_64_sse2(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let len = a.len();
    let chunks = len / 4;

    // SAFETY: SSE2 is always present on x86_64 and every load stays within
    // `chunks * 4 <= len` elements of both slices.
    let mut result = unsafe {
        let mut acc = _mm_setzero_ps();
        for i in 0..chunks {
            let idx = i * 4;
            let va = _mm_loadu_ps(a.as_ptr().add(idx));
            let vb = _mm_loadu_ps(b.as_ptr().add(idx));
            acc = _mm_add_ps(acc, _mm_mul_ps(va, vb));
        }

        // [a, b, c, d] -> a + b + c + d
        let hi = _mm_movehl_ps(acc, acc); // [c, d, c, d]
        let pair = _mm_add_ps(acc, hi); // [a+c, b+d, ..]
        let odd = _mm_shuffle_ps(pair, pair, 0b01); // [b+d, ..]
        _mm_cvtss_f32(_mm_add_ss(pair, odd))
    };

    let base = chunks * 4;
    for i in base..len {
        result += a[i] * b[i];
    }
    result
}
