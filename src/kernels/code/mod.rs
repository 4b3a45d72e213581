//! Dot product implementations.
//!
//! This module contains every built-in kernel variant and the list of those
//! available on the current target.

pub mod c_impl;
mod reference;
mod unrolled;
#[cfg(target_arch = "x86_64")]
mod x86_64_asm;
#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
mod x86_64_avx2;
#[cfg(target_arch = "x86_64")]
mod x86_64_sse2;

pub use c_impl::C_KERNELS_AVAILABLE;
#[cfg(c_kernels_active)]
pub use c_impl::{sdot_c_reference, sdot_c_unrolled};
pub use reference::sdot_reference;
pub use unrolled::sdot_unrolled;
#[cfg(target_arch = "x86_64")]
pub use x86_64_asm::sdot_x86_64_asm;
#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
pub use x86_64_avx2::sdot_x86_64_avx2;
#[cfg(target_arch = "x86_64")]
pub use x86_64_sse2::sdot_x86_64_sse2;

use crate::registry::KernelVariant;

/// Get all available variants for the current target.
///
/// The reference comes first, then the kernels that keep its accumulation
/// order, then the reordering ones.
pub fn available_variants() -> Vec<KernelVariant> {
    let mut variants = vec![KernelVariant {
        name: "reference",
        description: "Sequential reference loop",
        function: sdot_reference,
    }];

    #[cfg(target_arch = "x86_64")]
    variants.push(KernelVariant {
        name: "x86_64-asm",
        description: "Hand-written x86_64 scalar assembly loop",
        function: sdot_x86_64_asm,
    });

    #[cfg(c_kernels_active)]
    variants.push(KernelVariant {
        name: "c-reference",
        description: "Externally compiled C sequential loop",
        function: sdot_c_reference,
    });

    variants.push(KernelVariant {
        name: "unrolled",
        description: "Scalar loop unrolled 4x with independent accumulators",
        function: sdot_unrolled,
    });

    #[cfg(c_kernels_active)]
    variants.push(KernelVariant {
        name: "c-unrolled",
        description: "Externally compiled C loop unrolled 4x",
        function: sdot_c_unrolled,
    });

    #[cfg(target_arch = "x86_64")]
    variants.push(KernelVariant {
        name: "x86_64-sse2",
        description: "x86_64 with SSE2 SIMD intrinsics",
        function: sdot_x86_64_sse2,
    });

    #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
    variants.push(KernelVariant {
        name: "x86_64-avx2",
        description: "x86_64 with AVX2 SIMD intrinsics",
        function: sdot_x86_64_avx2,
    });

    variants
}
