//! Input vector generation.
//!
//! [`VectorFactory`] owns the run's single random generator. Its seed is
//! resolved once from [`SeedMode`] and exposed through
//! [`VectorFactory::seed`] so every report states which inputs it measured.

use crate::config::{FillPolicy, SeedMode};
use crate::error::{BenchError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Deref;

/// Fixed-length owned `f32` buffer.
///
/// The length is set at allocation and cannot change; elements are only
/// mutable through [`VectorFactory::populate`] and [`VectorFactory::normalize`].
#[derive(Clone, Debug, PartialEq)]
pub struct Vector {
    data: Box<[f32]>,
}

impl Vector {
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Wrap existing values (used for hand-picked inputs).
    pub fn from_values(values: &[f32]) -> Self {
        Self {
            data: values.into(),
        }
    }
}

impl Deref for Vector {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.data
    }
}

/// Outcome of [`VectorFactory::normalize`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalization {
    /// Euclidean norm before scaling
    pub norm: f64,
    /// The norm was zero or non-finite, so the elements are now NaN/inf
    pub degenerate: bool,
}

/// Allocates, fills and normalizes benchmark inputs.
pub struct VectorFactory {
    rng: StdRng,
    seed: u64,
    fill: FillPolicy,
    element_limit: Option<usize>,
}

impl VectorFactory {
    pub fn new(seed_mode: SeedMode, fill: FillPolicy) -> Self {
        let seed = seed_mode.resolve();
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            fill,
            element_limit: None,
        }
    }

    /// Refuse single allocations larger than `limit` elements.
    pub fn with_element_limit(mut self, limit: usize) -> Self {
        self.element_limit = Some(limit);
        self
    }

    /// Seed actually used by this factory
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn fill_policy(&self) -> FillPolicy {
        self.fill
    }

    /// Reserve a zeroed vector of `length` elements.
    ///
    /// Fails with [`BenchError::Allocation`] when the request exceeds the
    /// element limit, overflows the address space, or the allocator refuses it.
    pub fn allocate(&self, length: usize) -> Result<Vector> {
        if self.element_limit.is_some_and(|limit| length > limit) {
            return Err(BenchError::allocation(length));
        }
        if length.checked_mul(std::mem::size_of::<f32>()).is_none() {
            return Err(BenchError::allocation(length));
        }

        let mut data: Vec<f32> = Vec::new();
        data.try_reserve_exact(length)
            .map_err(|_| BenchError::allocation(length))?;
        data.resize(length, 0.0);

        Ok(Vector {
            data: data.into_boxed_slice(),
        })
    }

    /// Fill every element from the fill policy.
    pub fn populate(&mut self, vector: &mut Vector) {
        match self.fill {
            FillPolicy::Uniform { low, high } => {
                for x in vector.data.iter_mut() {
                    *x = self.rng.random_range(low..high);
                }
            }
            FillPolicy::FullRange => {
                for x in vector.data.iter_mut() {
                    *x = (self.rng.random::<u32>() >> 1) as f32 / 5.0;
                }
            }
            FillPolicy::Zeros => vector.data.fill(0.0),
        }
    }

    /// Scale `vector` to unit Euclidean length in place.
    ///
    /// A zero norm is not guarded: the division yields NaN (or inf) elements
    /// and the result is flagged as degenerate.
    pub fn normalize(vector: &mut Vector) -> Normalization {
        let norm = euclidean_norm(&vector.data);
        let divisor = norm as f32;
        for x in vector.data.iter_mut() {
            *x /= divisor;
        }
        Normalization {
            norm,
            degenerate: !(norm.is_finite() && divisor != 0.0 && divisor.is_finite()),
        }
    }

    /// Allocate, populate and normalize in one go.
    pub fn generate(&mut self, length: usize) -> Result<(Vector, Normalization)> {
        let mut vector = self.allocate(length)?;
        self.populate(&mut vector);
        let normalization = Self::normalize(&mut vector);
        Ok((vector, normalization))
    }
}

/// Square root of the sum of squares, accumulated sequentially in `f64`.
pub fn euclidean_norm(values: &[f32]) -> f64 {
    let mut sum = 0.0f64;
    for &x in values {
        let x = x as f64;
        sum += x * x;
    }
    sum.sqrt()
}
