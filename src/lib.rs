//! # NEUROGEN
//!
//! Feedforward networks whose parameters evolve through genetic operators.
//!
//! ## Features
//!
//! - **Per-neuron activations**: linear or exponential linear units, with
//!   the ELU leakage stored as a gene on each neuron
//! - **Pure operators**: `fire`, `mutate` and `crossover` never modify their
//!   operands
//! - **Reproducible**: every random draw goes through a seedable
//!   [`RandomGenerator`](genetics::RandomGenerator)
//! - **Parallel**: neurons of a layer can be fired on the rayon pool
//! - **Persistent**: JSON and bincode forms that keep NaN and infinities
//!
//! ## Quick Start
//!
//! ```rust
//! use neurogen::genetics::{Genetic, RandomGenerator};
//! use neurogen::neural::{ActivationKind, NetworkBuilder};
//! use neurogen::Config;
//!
//! let config = Config::default();
//! let mut rng = RandomGenerator::seeded(42, config.genes).unwrap();
//!
//! let builder = NetworkBuilder::new(3)
//!     .layer(5, &[ActivationKind::ExponentialLinearUnit])
//!     .layer(1, &[ActivationKind::Linear]);
//! let mother = builder.generate(&mut rng);
//! let father = builder.generate(&mut rng);
//!
//! let child = mother
//!     .crossover(&father, &mut rng)
//!     .unwrap()
//!     .mutate(config.evolution.mutation_rate, &mut rng);
//!
//! let outputs = child.fire(&[0.1, 0.2, 0.3]).unwrap();
//! assert_eq!(outputs.len(), 1);
//! ```
//!
//! ## Persistence
//!
//! ```rust
//! use neurogen::genetics::RandomGenerator;
//! use neurogen::neural::{Network, NetworkBuilder};
//! use neurogen::Config;
//!
//! let config = Config::default();
//! let mut rng = RandomGenerator::seeded(7, config.genes).unwrap();
//! let net = NetworkBuilder::new(2).layer(2, &[]).generate(&mut rng);
//!
//! let json = net.to_json().unwrap();
//! assert_eq!(Network::from_json(&json).unwrap(), net);
//! ```

pub mod config;
pub mod error;
pub mod genetics;
pub mod instrument;
pub mod neural;

// Re-export main types
pub use config::Config;
pub use error::{NetworkError, PersistError};
pub use genetics::{Genetic, RandomGenerator};
pub use neural::{Activation, ActivationKind, Layer, Network, NetworkBuilder, Neuron};

use instrument::{timed, Operation, TimingStats};
use std::time::Duration;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of distinct input vectors drawn for a benchmark run
const BENCHMARK_INPUT_SETS: usize = 1000;

/// Time generation, repeated firing, mutation and crossover for the
/// network shape described by `config`.
pub fn benchmark(config: &Config, iterations: u64, seed: u64) -> Result<BenchmarkResult, String> {
    config.validate()?;
    let mut rng = RandomGenerator::seeded(seed, config.genes)?;
    let stats = TimingStats::new();
    let builder = NetworkBuilder::from_config(&config.network);

    let net = timed(Some(&stats), Operation::Generate, || builder.generate(&mut rng));
    let mate = builder.generate(&mut rng);

    let input_size = net.input_size();
    let input_sets: Vec<Vec<f64>> = (0..BENCHMARK_INPUT_SETS)
        .map(|_| (0..input_size).map(|_| rng.random()).collect())
        .collect();

    let mut failures = 0u64;
    for _ in 0..iterations {
        let inputs = &input_sets[rng.random_index(input_sets.len())];
        if timed(Some(&stats), Operation::Fire, || net.fire(inputs)).is_err() {
            failures += 1;
        }
    }

    let rate = config.evolution.mutation_rate;
    timed(Some(&stats), Operation::Mutate, || net.mutate(rate, &mut rng));
    if timed(Some(&stats), Operation::Crossover, || net.crossover(&mate, &mut rng)).is_err() {
        failures += 1;
    }

    let total = stats.total(Operation::Fire);
    Ok(BenchmarkResult {
        iterations,
        topology: net.topology(),
        parameters: net.parameter_count(),
        failures,
        fire_total_secs: total.as_secs_f64(),
        fire_mean_nanos: saturating_nanos(stats.mean(Operation::Fire)),
        fires_per_second: if total.is_zero() {
            0.0
        } else {
            iterations as f64 / total.as_secs_f64()
        },
        generate_nanos: saturating_nanos(stats.total(Operation::Generate)),
        mutate_nanos: saturating_nanos(stats.total(Operation::Mutate)),
        crossover_nanos: saturating_nanos(stats.total(Operation::Crossover)),
    })
}

fn saturating_nanos(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub iterations: u64,
    pub topology: Vec<usize>,
    pub parameters: usize,
    pub failures: u64,
    pub fire_total_secs: f64,
    pub fire_mean_nanos: u64,
    pub fires_per_second: f64,
    pub generate_nanos: u64,
    pub mutate_nanos: u64,
    pub crossover_nanos: u64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Topology: {:?} ({} parameters)", self.topology, self.parameters)?;
        writeln!(f, "Fires: {} ({} failed)", self.iterations, self.failures)?;
        writeln!(f, "Fire time: {:.3}s", self.fire_total_secs)?;
        writeln!(f, "Mean fire: {}ns", self.fire_mean_nanos)?;
        writeln!(f, "Speed: {:.1} fires/s", self.fires_per_second)?;
        writeln!(f, "Generate: {}ns", self.generate_nanos)?;
        writeln!(f, "Mutate: {}ns", self.mutate_nanos)?;
        writeln!(f, "Crossover: {}ns", self.crossover_nanos)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayerConfig, NetworkConfig};

    fn small_config() -> Config {
        let mut config = Config::default();
        config.network = NetworkConfig {
            input_size: 10,
            layers: vec![
                LayerConfig {
                    units: 6,
                    activations: vec![ActivationKind::ExponentialLinearUnit],
                },
                LayerConfig {
                    units: 2,
                    activations: vec![],
                },
            ],
        };
        config
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_benchmark() {
        let result = benchmark(&small_config(), 100, 1).unwrap();

        assert_eq!(result.iterations, 100);
        assert_eq!(result.topology, vec![6, 2]);
        assert_eq!(result.parameters, 6 * 11 + 2 * 7);
        assert_eq!(result.failures, 0);
        assert!(result.to_string().contains("Benchmark Results"));
    }

    #[test]
    fn test_benchmark_rejects_invalid_config() {
        let mut config = small_config();
        config.genes.bias_min = f64::NAN;
        assert!(benchmark(&config, 10, 1).is_err());

        let mut config = small_config();
        config.genes.bias_min = 0.0;
        config.genes.bias_max = 0.0;
        assert!(benchmark(&config, 10, 1).is_ok());
    }

    #[test]
    fn test_saturating_nanos() {
        assert_eq!(saturating_nanos(Duration::from_nanos(1234)), 1234);
        assert_eq!(saturating_nanos(Duration::MAX), u64::MAX);
    }
}
