//! # Uniform Variate Sources
//!
//! The rate-based error model consumes uniform variates in `[0, 1)` through
//! the [`UniformSource`] trait so that deterministic sources can be swapped
//! in for reproducible simulation and tests.
//!
//! ### Sources:
//! - [`SeededUniform`]: `SmallRng`-backed production source, seedable.
//! - [`FixedUniform`]: always returns one configured value.
//! - [`SequenceUniform`]: replays a configured sequence, cycling.
//!
//! The deterministic sources count their draws through a shared
//! [`DrawCounter`], which makes the number of trials a model consumed per
//! decision observable from the outside.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Supplier of uniform variates in `[0, 1)`.
pub trait UniformSource: Send {
    /// Returns the next variate. Each call advances the source's state.
    fn draw(&mut self) -> f64;
}

/// Default variate source backed by `SmallRng`.
///
/// Seed it for deterministic replay; the same seed yields the same variate
/// sequence across runs.
#[derive(Debug)]
pub struct SeededUniform {
    rng: SmallRng,
}

impl SeededUniform {
    /// Creates a source with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl Default for SeededUniform {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl UniformSource for SeededUniform {
    #[inline]
    fn draw(&mut self) -> f64 {
        self.rng.random()
    }
}

/// Shared handle onto the draw count of a deterministic source.
///
/// Cloning the handle (or the source that owns it) keeps pointing at the
/// same counter, so a test can hand the source to a model and still watch
/// how many variates each decision consumed.
#[derive(Clone, Debug, Default)]
pub struct DrawCounter(Arc<AtomicU64>);

impl DrawCounter {
    /// Total draws performed so far.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

/// Source that always returns the same variate.
#[derive(Clone, Debug)]
pub struct FixedUniform {
    value: f64,
    counter: DrawCounter,
}

impl FixedUniform {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            counter: DrawCounter::default(),
        }
    }

    /// Handle onto this source's draw counter.
    pub fn counter(&self) -> DrawCounter {
        self.counter.clone()
    }
}

impl UniformSource for FixedUniform {
    fn draw(&mut self) -> f64 {
        self.counter.bump();
        self.value
    }
}

/// Source that replays a configured variate sequence, cycling at the end.
///
/// Clones keep their own sequence position but share the draw counter.
#[derive(Clone, Debug)]
pub struct SequenceUniform {
    values: Vec<f64>,
    next: usize,
    counter: DrawCounter,
}

impl SequenceUniform {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "variate sequence must not be empty");
        Self {
            values,
            next: 0,
            counter: DrawCounter::default(),
        }
    }

    /// Handle onto this source's draw counter.
    pub fn counter(&self) -> DrawCounter {
        self.counter.clone()
    }
}

impl UniformSource for SequenceUniform {
    fn draw(&mut self) -> f64 {
        let value = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        self.counter.bump();
        value
    }
}
