//! Seedable gene sampler shared by generation, mutation and crossover.

use crate::config::GeneConfig;
use crate::neural::{Activation, ActivationKind};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Random source for genetic operations.
///
/// Wraps any [`Rng`] together with the bounds genes are drawn from. Every
/// operation that needs randomness takes one of these by `&mut`, so two
/// generators seeded alike replay the same sequence of networks.
#[derive(Clone, Debug)]
pub struct RandomGenerator<R: Rng = ChaCha8Rng> {
    rng: R,
    bounds: GeneConfig,
}

impl RandomGenerator<ChaCha8Rng> {
    /// Create a reproducible generator
    pub fn seeded(seed: u64, bounds: GeneConfig) -> Result<Self, String> {
        Self::new(ChaCha8Rng::seed_from_u64(seed), bounds)
    }

    /// Create a generator seeded from the operating system
    pub fn from_entropy(bounds: GeneConfig) -> Result<Self, String> {
        Self::new(ChaCha8Rng::from_entropy(), bounds)
    }
}

impl<R: Rng> RandomGenerator<R> {
    /// Fails when a bound is not finite or a minimum exceeds its maximum.
    /// Equal bounds pin the gene to that value.
    pub fn new(rng: R, bounds: GeneConfig) -> Result<Self, String> {
        bounds.validate()?;
        Ok(Self { rng, bounds })
    }

    pub fn bounds(&self) -> &GeneConfig {
        &self.bounds
    }

    /// Uniform float in `[0, 1)`
    #[inline]
    pub fn random(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    #[inline]
    pub fn random_bias(&mut self) -> f64 {
        self.uniform(self.bounds.bias_min, self.bounds.bias_max)
    }

    #[inline]
    pub fn random_weight(&mut self) -> f64 {
        self.uniform(self.bounds.weight_min, self.bounds.weight_max)
    }

    #[inline]
    pub fn random_leakage(&mut self) -> f64 {
        self.uniform(self.bounds.leakage_min, self.bounds.leakage_max)
    }

    /// Uniform float in `[min, max)`, or `min` itself for an empty range
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Uniform index in `0..len`; `len` must be non-zero
    pub fn random_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    pub fn random_weights(&mut self, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.random_weight()).collect()
    }

    /// Fair coin flip
    #[inline]
    pub fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Pick an activation from the eligible kinds and draw its parameters.
    ///
    /// An empty set yields [`Activation::Linear`]; a single kind is assigned
    /// without consuming a draw for the choice itself.
    pub fn random_activation(&mut self, eligible: &[ActivationKind]) -> Activation {
        let kind = match eligible {
            [] => ActivationKind::Linear,
            [only] => *only,
            _ => eligible[self.rng.gen_range(0..eligible.len())],
        };
        match kind {
            ActivationKind::Linear => Activation::Linear,
            ActivationKind::ExponentialLinearUnit => Activation::ExponentialLinearUnit {
                leakage: self.random_leakage(),
            },
        }
    }
}
