//! Hand-written x86_64 assembly kernel.
//!
//! A scalar SSE loop that keeps the reference accumulation order:
//!
//! ```asm
//!     xorps  acc, acc
//! 2:
//!     movss  tmp, [a + i*4]
//!     mulss  tmp, [b + i*4]     ; tmp = a[i] * b[i]
//!     addss  acc, tmp           ; acc += tmp
//!     inc    i
//!     cmp    i, n
//!     jb     2b
//! ```
//!
//! Each product is rounded to f32 before the add, exactly like the reference
//! loop, so both kernels return identical bits for identical inputs.

use std::arch::asm;

/// Compute the dot product with an inline-assembly sequential loop.
///
/// # Panics
/// Panics if the vectors have different lengths.
#[inline(never)]
pub fn sdot_x86_64_asm(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");

    let n = a.len();
    if n == 0 {
        return 0.0;
    }

    let acc: f32;
    // SAFETY: the loop reads indices 0..n of both slices, which both hold n
    // elements; it writes no memory.
    unsafe {
        asm!(
            "xorps {acc}, {acc}",
            "2:",
            "movss {tmp}, dword ptr [{a} + {i} * 4]",
            "mulss {tmp}, dword ptr [{b} + {i} * 4]",
            "addss {acc}, {tmp}",
            "inc {i}",
            "cmp {i}, {n}",
            "jb 2b",
            a = in(reg) a.as_ptr(),
            b = in(reg) b.as_ptr(),
            n = in(reg) n,
            i = inout(reg) 0usize => _,
            acc = out(xmm_reg) acc,
            tmp = out(xmm_reg) _,
            options(nostack, readonly),
        );
    }
    acc
}
