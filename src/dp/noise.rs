//! Laplace noise generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp1};

/// Source of zero-mean Laplace noise
///
/// Implementations do not validate `scale`; callers derive it as
/// `sensitivity / epsilon` after checking `epsilon > 0`.
pub trait NoiseSource {
    /// Draw one sample from Laplace(0, scale)
    fn sample_laplace(&mut self, scale: f64) -> f64;
}

/// Laplace sampler backed by a pseudo-random generator
///
/// Laplace(0, b) is the difference of two independent Exp(1/b) draws, so each
/// sample is `b * (E1 - E2)` with `E1, E2 ~ Exp(1)`.
#[derive(Debug, Clone)]
pub struct LaplaceNoise<R = StdRng> {
    rng: R,
}

impl LaplaceNoise<StdRng> {
    /// Create a sampler seeded from the operating system
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// Create a reproducible sampler
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for LaplaceNoise<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> LaplaceNoise<R> {
    /// Wrap an existing generator
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> NoiseSource for LaplaceNoise<R> {
    fn sample_laplace(&mut self, scale: f64) -> f64 {
        let e1: f64 = Exp1.sample(&mut self.rng);
        let e2: f64 = Exp1.sample(&mut self.rng);
        scale * (e1 - e2)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn sample_laplace(&mut self, scale: f64) -> f64 {
        (**self).sample_laplace(scale)
    }
}
