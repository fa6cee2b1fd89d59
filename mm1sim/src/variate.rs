//! Random variate generation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp1};

/// Source of random durations consumed by the simulation.
pub trait VariateSource {
    /// Draws an exponentially distributed value with the given `mean`.
    fn exponential(&mut self, mean: f64) -> f64;
}

/// Variate source drawing from a unit distribution `D` and scaling it by the requested mean.
///
/// With the default unit exponential distribution, this produces exponential deviates.
/// Replacing `D` with a deterministic distribution scripts the durations, which is how the
/// simulation is exercised in tests.
pub struct Variates<R, D = Exp1>
where
    R: Rng,
    D: Distribution<f64>,
{
    rng: R,
    unit: D,
}

/// Variate source used by default: exponential deviates over a seeded ChaCha generator.
pub type SeededSource = Variates<ChaCha8Rng>;

impl<R: Rng> Variates<R> {
    /// Creates an exponential source over `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng, unit: Exp1 }
    }
}

impl Variates<ChaCha8Rng> {
    /// Creates an exponential source whose draws depend only on `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates an exponential source seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }
}

impl<R, D> Variates<R, D>
where
    R: Rng,
    D: Distribution<f64>,
{
    /// Creates a source scaling samples of `unit` by the requested mean.
    pub fn new(rng: R, unit: D) -> Self {
        Self { rng, unit }
    }

    /// Returns the underlying unit distribution.
    pub fn unit(&self) -> &D {
        &self.unit
    }
}

impl<R, D> VariateSource for Variates<R, D>
where
    R: Rng,
    D: Distribution<f64>,
{
    fn exponential(&mut self, mean: f64) -> f64 {
        mean * self.unit.sample(&mut self.rng)
    }
}

impl<T: VariateSource + ?Sized> VariateSource for &mut T {
    fn exponential(&mut self, mean: f64) -> f64 {
        (**self).exponential(mean)
    }
}

impl<T: VariateSource + ?Sized> VariateSource for Box<T> {
    fn exponential(&mut self, mean: f64) -> f64 {
        (**self).exponential(mean)
    }
}
