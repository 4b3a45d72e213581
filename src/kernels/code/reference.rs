//! Reference implementation of the dot product.
//!
//! An explicit sequential loop: the accumulation order every other kernel is
//! compared against.

/// Compute the dot product of two vectors.
///
/// # Panics
/// Panics if the vectors have different lengths.
///
/// # Example
/// ```
/// use sdot_bench::kernels::sdot_reference;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 5.0, 6.0];
/// assert_eq!(sdot_reference(&a, &b), 32.0);
/// ```
pub fn sdot_reference(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let mut sum = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        sum += x * y;
    }
    sum
}
