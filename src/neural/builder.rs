//! Random construction of networks from a declared shape.

use super::activation::ActivationKind;
use super::layer::Layer;
use super::network::Network;
use crate::config::NetworkConfig;
use crate::genetics::RandomGenerator;
use rand::Rng;

/// Declares a network shape and generates random individuals from it.
///
/// ```rust
/// use neurogen::config::GeneConfig;
/// use neurogen::genetics::RandomGenerator;
/// use neurogen::neural::{ActivationKind, NetworkBuilder};
///
/// let mut rng = RandomGenerator::seeded(42, GeneConfig::default()).unwrap();
/// let net = NetworkBuilder::new(4)
///     .layer(8, &[ActivationKind::ExponentialLinearUnit])
///     .layer(2, &[ActivationKind::Linear])
///     .generate(&mut rng);
///
/// assert_eq!(net.topology(), vec![8, 2]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkBuilder {
    input_size: usize,
    layers: Vec<(usize, Vec<ActivationKind>)>,
}

impl NetworkBuilder {
    pub fn new(input_size: usize) -> Self {
        Self {
            input_size,
            layers: Vec::new(),
        }
    }

    pub fn from_config(config: &NetworkConfig) -> Self {
        config
            .layers
            .iter()
            .fold(Self::new(config.input_size), |builder, layer| {
                builder.layer(layer.units, &layer.activations)
            })
    }

    /// Append a layer of `units` neurons drawing activations from `eligible`.
    pub fn layer(mut self, units: usize, eligible: &[ActivationKind]) -> Self {
        self.layers.push((units, eligible.to_vec()));
        self
    }

    /// Generate a random network; each layer's fan-in is the previous
    /// layer's size, or the input size for the first layer.
    pub fn generate<R: Rng>(&self, rng: &mut RandomGenerator<R>) -> Network {
        let mut fan_in = self.input_size;
        let mut layers = Vec::with_capacity(self.layers.len());
        for (units, eligible) in &self.layers {
            layers.push(Layer::generate(*units, fan_in, eligible, rng));
            fan_in = *units;
        }

        log::debug!(
            "Generated network: inputs={}, topology={:?}",
            self.input_size,
            self.layers.iter().map(|(units, _)| *units).collect::<Vec<_>>()
        );

        Network::assemble(self.input_size, layers)
    }
}
