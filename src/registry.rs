//! Kernel registry for composing the set of compared implementations.
//!
//! Kernels are registered once at composition time; the runner iterates the
//! registry in registration order, so adding a variant never requires
//! touching the runner.

use crate::kernels::code;

/// Function signature shared by the built-in dot product variants
pub type DotFn = fn(&[f32], &[f32]) -> f32;

/// Dot product capability.
///
/// `dot(n, a, b)` returns the sum over `i` in `[0, n)` of `a[i] * b[i]`.
/// Both slices must hold at least `n` elements; only the first `n` are read.
/// Implementations must not have side effects and must return 0.0 for
/// `n == 0`.
pub trait Kernel {
    /// Unique identifier (e.g., "reference", "x86_64-asm")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Compute the dot product of the first `n` elements
    fn dot(&self, n: usize, a: &[f32], b: &[f32]) -> f32;
}

/// A kernel backed by a plain function over equal-length slices.
#[derive(Clone, Copy)]
pub struct KernelVariant {
    pub name: &'static str,
    pub description: &'static str,
    pub function: DotFn,
}

impl Kernel for KernelVariant {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    #[inline]
    fn dot(&self, n: usize, a: &[f32], b: &[f32]) -> f32 {
        (self.function)(&a[..n], &b[..n])
    }
}

/// Ordered set of kernels. The first registered kernel is the reference.
pub struct KernelRegistry {
    kernels: Vec<Box<dyn Kernel>>,
}

impl KernelRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            kernels: Vec::new(),
        }
    }

    /// Register a kernel
    pub fn register<K: Kernel + 'static>(&mut self, kernel: K) {
        self.kernels.push(Box::new(kernel));
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<K: Kernel + 'static>(mut self, kernel: K) -> Self {
        self.register(kernel);
        self
    }

    /// All kernels in registration order
    pub fn all(&self) -> &[Box<dyn Kernel>] {
        &self.kernels
    }

    /// Find kernel by name
    pub fn find(&self, name: &str) -> Option<&dyn Kernel> {
        self.kernels
            .iter()
            .find(|k| k.name() == name)
            .map(|k| k.as_ref())
    }

    /// The reference kernel every other kernel is checked against
    pub fn reference(&self) -> Option<&dyn Kernel> {
        self.kernels.first().map(|k| k.as_ref())
    }

    /// List kernel names
    pub fn names(&self) -> Vec<&'static str> {
        self.kernels.iter().map(|k| k.name()).collect()
    }

    /// Keep only kernels whose name is in `names`. The reference is always kept.
    pub fn retain_names(&mut self, names: &[String]) {
        let reference = self.reference().map(|k| k.name());
        self.kernels
            .retain(|k| Some(k.name()) == reference || names.iter().any(|n| n == k.name()));
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}

impl Default for KernelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with every kernel available on this target
pub fn build_registry() -> KernelRegistry {
    let mut registry = KernelRegistry::new();
    for variant in code::available_variants() {
        registry.register(variant);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubled;

    impl Kernel for Doubled {
        fn name(&self) -> &'static str {
            "doubled"
        }
        fn description(&self) -> &'static str {
            "Twice the reference result"
        }
        fn dot(&self, n: usize, a: &[f32], b: &[f32]) -> f32 {
            2.0 * a[..n].iter().zip(&b[..n]).map(|(x, y)| x * y).sum::<f32>()
        }
    }

    #[test]
    fn test_reference_is_first() {
        let registry = build_registry();
        assert_eq!(registry.reference().map(|k| k.name()), Some("reference"));
    }

    #[test]
    fn test_open_set_registration() {
        let registry = build_registry().with(Doubled);
        let custom = registry.find("doubled").expect("custom kernel registered");
        assert_eq!(custom.dot(2, &[1.0, 2.0], &[3.0, 4.0]), 22.0);
        assert_eq!(registry.names().last(), Some(&"doubled"));
    }

    #[test]
    fn test_variant_reads_only_prefix() {
        let registry = build_registry();
        let reference = registry.reference().unwrap();
        let a = [1.0, 2.0, 100.0];
        let b = [1.0, 1.0, 100.0];
        assert_eq!(reference.dot(2, &a, &b), 3.0);
    }

    #[test]
    fn test_retain_names_keeps_reference() {
        let mut registry = build_registry().with(Doubled);
        registry.retain_names(&["doubled".to_string()]);
        assert_eq!(registry.names(), vec!["reference", "doubled"]);
    }

    #[test]
    fn test_names_are_unique() {
        let names = build_registry().names();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }
}
