//! Build script to compile the C dot product kernels.

use std::env;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(c_kernels_active)");
    println!("cargo:rerun-if-changed=build.rs");

    if env::var_os("CARGO_FEATURE_C_KERNELS").is_none() {
        return;
    }

    let build = cc::Build::new();
    let compiler = match build.try_get_compiler() {
        Ok(compiler) => compiler,
        Err(e) => {
            println!("cargo:warning=No usable C compiler ({}). C kernels disabled.", e);
            return;
        }
    };

    let compiler_name = if compiler.is_like_msvc() {
        "MSVC"
    } else if compiler.is_like_clang() {
        "Clang"
    } else if compiler.is_like_gnu() {
        "GCC"
    } else {
        println!("cargo:warning=C compiler is not GCC, Clang or MSVC. C kernels disabled.");
        return;
    };

    let c_files: Vec<_> = match glob::glob("src/**/*.c") {
        Ok(paths) => paths.filter_map(|entry| entry.ok()).collect(),
        Err(e) => {
            println!("cargo:warning=Bad glob pattern ({}). C kernels disabled.", e);
            return;
        }
    };
    if c_files.is_empty() {
        return;
    }

    let mut build = cc::Build::new();
    for file in &c_files {
        println!("cargo:rerun-if-changed={}", file.display());
        build.file(file);
    }

    // No -ffast-math and no FMA contraction: the C loop must keep the
    // sequential accumulation order and per-product rounding.
    build.opt_level(3).flag_if_supported("-ffp-contract=off");

    if let Err(e) = build.try_compile("sdot_c") {
        println!("cargo:warning=Compiling C kernels failed ({}). C kernels disabled.", e);
        return;
    }

    println!("cargo:rustc-cfg=c_kernels_active");
    println!("cargo:rustc-env=C_COMPILER_NAME={}", compiler_name);
}
