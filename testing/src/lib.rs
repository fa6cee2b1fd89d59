//! Deterministic distributions for driving simulations in tests.

#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::default_trait_access)]

use std::cell::Cell;

use rand::distributions::Distribution;

/// This distribution ignores the random number generator and always produces the same value.
///
/// Used in place of a unit exponential distribution, `ConstantDistribution::new(1.0)` makes
/// every drawn duration equal to the requested mean.
#[derive(Debug, Clone, Copy)]
pub struct ConstantDistribution {
    value: f64,
}

impl ConstantDistribution {
    /// Constructs a distribution always producing `value`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Distribution<f64> for ConstantDistribution {
    fn sample<R: rand::Rng + ?Sized>(&self, _: &mut R) -> f64 {
        self.value
    }
}

/// Produces the given values in order, wrapping around after the last one.
///
/// The position is kept in a [`Cell`], because [`Distribution::sample`] takes `&self`.
/// Together with `rand::rngs::mock::StepRng`, this gives a fully scripted sequence of draws.
///
/// # Panics
///
/// Sampling panics if the script is empty.
#[derive(Debug, Clone)]
pub struct ScriptedDistribution {
    values: Vec<f64>,
    position: Cell<usize>,
}

impl ScriptedDistribution {
    /// Constructs a distribution replaying `values`.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            position: Cell::new(0),
        }
    }

    /// Number of values sampled so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.position.get()
    }
}

impl Distribution<f64> for ScriptedDistribution {
    fn sample<R: rand::Rng + ?Sized>(&self, _: &mut R) -> f64 {
        assert!(!self.values.is_empty(), "empty script");
        let position = self.position.get();
        self.position.replace(position + 1);
        self.values[position % self.values.len()]
    }
}
