//! x86_64 AVX2 SIMD implementation.
//!
//! Only compiled when the build targets AVX2 (e.g. `-C target-cpu=native`
//! on a capable machine). Uses FMA when that target feature is enabled too.

use std::arch::x86_64::*;

/// Compute the dot product using AVX2, 8 floats per iteration.
///
/// # Panics
/// Panics if the vectors have different lengths.
pub fn sdot_x86_64_avx2(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let len = a.len();
    let chunks = len / 8;

    // SAFETY: the module is only built with the avx2 target feature enabled,
    // and every load stays within `chunks * 8 <= len` elements.
    let mut result = unsafe {
        let mut acc = _mm256_setzero_ps();
        for i in 0..chunks {
            let idx = i * 8;
            let va = _mm256_loadu_ps(a.as_ptr().add(idx));
            let vb = _mm256_loadu_ps(b.as_ptr().add(idx));

            #[cfg(target_feature = "fma")]
            {
                acc = _mm256_fmadd_ps(va, vb, acc);
            }
            #[cfg(not(target_feature = "fma"))]
            {
                acc = _mm256_add_ps(acc, _mm256_mul_ps(va, vb));
            }
        }

        let lo = _mm256_castps256_ps128(acc);
        let hi = _mm256_extractf128_ps(acc, 1);
        let quad = _mm_add_ps(lo, hi);
        let pair = _mm_add_ps(quad, _mm_movehl_ps(quad, quad));
        let odd = _mm_shuffle_ps(pair, pair, 0b01);
        _mm_cvtss_f32(_mm_add_ss(pair, odd))
    };

    let base = chunks * 8;
    for i in base..len {
        result += a[i] * b[i];
    }
    result
}
