//! Error types for the benchmark harness.

use thiserror::Error;

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur while preparing or running a sweep
#[derive(Debug, Error)]
pub enum BenchError {
    /// A vector buffer could not be reserved. Fatal for that size only.
    #[error("allocation of {elements} elements ({bytes} bytes) failed")]
    Allocation {
        /// Number of `f32` elements requested
        elements: usize,
        /// Requested size in bytes (saturated on overflow)
        bytes: usize,
    },

    /// Invalid sweep or runner configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Normalization produced non-finite values
    #[error("degenerate input at size {size}: normalization produced non-finite values")]
    DegenerateInput {
        /// Vector length of the affected size
        size: usize,
    },

    /// A kernel disagreed with the reference kernel
    #[error("kernel '{kernel}' mismatch in '{case}': expected {expected}, got {actual}")]
    KernelMismatch {
        kernel: String,
        case: String,
        expected: f32,
        actual: f32,
    },

    /// Report sink I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// Creates an allocation error for `elements` floats.
    pub fn allocation(elements: usize) -> Self {
        BenchError::Allocation {
            elements,
            bytes: elements.saturating_mul(std::mem::size_of::<f32>()),
        }
    }

    /// Whether this error only affects the current size (the sweep goes on).
    pub fn is_size_local(&self) -> bool {
        matches!(
            self,
            BenchError::Allocation { .. } | BenchError::DegenerateInput { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_error_bytes() {
        let err = BenchError::allocation(1 << 30);
        match err {
            BenchError::Allocation { elements, bytes } => {
                assert_eq!(elements, 1 << 30);
                assert_eq!(bytes, 4 << 30);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_allocation_error_saturates() {
        match BenchError::allocation(usize::MAX) {
            BenchError::Allocation { bytes, .. } => assert_eq!(bytes, usize::MAX),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_size_local_classification() {
        assert!(BenchError::allocation(8).is_size_local());
        assert!(BenchError::DegenerateInput { size: 8 }.is_size_local());
        assert!(!BenchError::Config("cycles must be >= 1".into()).is_size_local());
    }

    #[test]
    fn test_display() {
        let err = BenchError::Config("no sizes".into());
        assert_eq!(err.to_string(), "invalid configuration: no sizes");
    }
}
