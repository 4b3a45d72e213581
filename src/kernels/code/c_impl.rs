//! FFI bindings for the C kernels in `sdot.c`.

#[cfg(c_kernels_active)]
mod ffi {
    use libc::size_t;
    use std::os::raw::c_float;

    extern "C" {
        pub fn sdot_c_reference(n: size_t, a: *const c_float, b: *const c_float) -> c_float;
        pub fn sdot_c_unrolled(n: size_t, a: *const c_float, b: *const c_float) -> c_float;
    }
}

/// Whether build.rs compiled and linked the C kernels
#[cfg(c_kernels_active)]
pub const C_KERNELS_AVAILABLE: bool = true;

#[cfg(not(c_kernels_active))]
pub const C_KERNELS_AVAILABLE: bool = false;

/// C sequential kernel wrapper
#[cfg(c_kernels_active)]
pub fn sdot_c_reference(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    // SAFETY: both pointers are valid for a.len() reads and the C side
    // neither writes nor retains them.
    unsafe { ffi::sdot_c_reference(a.len(), a.as_ptr(), b.as_ptr()) }
}

/// C unrolled kernel wrapper
#[cfg(c_kernels_active)]
pub fn sdot_c_unrolled(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have the same length");
    // SAFETY: as above.
    unsafe { ffi::sdot_c_unrolled(a.len(), a.as_ptr(), b.as_ptr()) }
}
