//! Genetics module - the mutate/crossover contract and its random source.

pub mod random;

pub use random::RandomGenerator;

use crate::error::NetworkError;
use rand::Rng;

/// Gene-level recombination shared by units, layers and networks.
///
/// Both operations are pure: they read `self` (and `mate`) and return a new,
/// independent value. Composite implementations recurse positionally into
/// their children.
pub trait Genetic: Sized {
    /// Replace each gene with a fresh random value with probability `rate`.
    fn mutate<R: Rng>(&self, rate: f64, rng: &mut RandomGenerator<R>) -> Self;

    /// Uniform crossover: every gene comes from `self` or `mate` on a fair
    /// coin flip. Operands must share the same topology.
    fn crossover<R: Rng>(
        &self,
        mate: &Self,
        rng: &mut RandomGenerator<R>,
    ) -> Result<Self, NetworkError>;
}
