//! A single unit: weighted sum plus bias through its activation.

use super::activation::{Activation, ActivationKind};
use super::serde_float::PersistedFloat;
use crate::error::NetworkError;
use crate::genetics::{Genetic, RandomGenerator};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Smallest computational element of a network
#[derive(Clone, Debug, PartialEq)]
pub struct Neuron {
    bias: f64,
    weights: Vec<f64>,
    activation: Activation,
}

impl Neuron {
    pub fn new(bias: f64, weights: Vec<f64>, activation: Activation) -> Self {
        Self {
            bias,
            weights,
            activation,
        }
    }

    /// Draw a random neuron with one weight per input.
    pub fn generate<R: Rng>(
        input_size: usize,
        eligible: &[ActivationKind],
        rng: &mut RandomGenerator<R>,
    ) -> Self {
        let bias = rng.random_bias();
        let activation = rng.random_activation(eligible);
        let weights = rng.random_weights(input_size);
        Self::new(bias, weights, activation)
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Number of inputs this neuron accepts
    #[inline]
    pub fn fan_in(&self) -> usize {
        self.weights.len()
    }

    /// Compute `activation(inputs · weights + bias)`.
    #[inline]
    pub fn fire(&self, inputs: &[f64]) -> Result<f64, NetworkError> {
        let biased = self.dot_product_with_weights(inputs)? + self.bias;
        Ok(self.activation.evaluate(biased))
    }

    /// Summed left to right in index order.
    fn dot_product_with_weights(&self, inputs: &[f64]) -> Result<f64, NetworkError> {
        if inputs.len() != self.weights.len() {
            return Err(NetworkError::DimensionMismatch {
                expected: self.weights.len(),
                found: inputs.len(),
            });
        }
        Ok(inputs
            .iter()
            .zip(&self.weights)
            .fold(0.0, |acc, (input, weight)| acc + input * weight))
    }

    /// Check that no gene is NaN or infinite
    pub fn is_valid(&self) -> bool {
        self.bias.is_finite()
            && self.weights.iter().all(|w| w.is_finite())
            && self.activation.leakage().map_or(true, f64::is_finite)
    }

    /// Gene-by-gene equality on bit patterns (NaN equals NaN).
    pub fn identical(&self, other: &Self) -> bool {
        self.bias.to_bits() == other.bias.to_bits()
            && self.activation.bits_eq(&other.activation)
            && self.weights.len() == other.weights.len()
            && self
                .weights
                .iter()
                .zip(&other.weights)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Genetic for Neuron {
    fn mutate<R: Rng>(&self, rate: f64, rng: &mut RandomGenerator<R>) -> Self {
        let bias = if rng.random() < rate {
            rng.random_bias()
        } else {
            self.bias
        };

        let activation = match self.activation {
            Activation::ExponentialLinearUnit { leakage } => {
                let leakage = if rng.random() < rate {
                    rng.random_leakage()
                } else {
                    leakage
                };
                Activation::ExponentialLinearUnit { leakage }
            }
            Activation::Linear => Activation::Linear,
        };

        let weights = self
            .weights
            .iter()
            .map(|&w| if rng.random() < rate { rng.random_weight() } else { w })
            .collect();

        Self::new(bias, weights, activation)
    }

    fn crossover<R: Rng>(
        &self,
        mate: &Self,
        rng: &mut RandomGenerator<R>,
    ) -> Result<Self, NetworkError> {
        if mate.weights.len() != self.weights.len() {
            return Err(NetworkError::TopologyMismatch(format!(
                "neuron has {} weights but mate has {}",
                self.weights.len(),
                mate.weights.len()
            )));
        }

        let bias = if rng.coin_flip() { mate.bias } else { self.bias };
        // Leakage travels with the activation it parameterises.
        let activation = if rng.coin_flip() {
            mate.activation
        } else {
            self.activation
        };
        let weights = self
            .weights
            .iter()
            .zip(&mate.weights)
            .map(|(&own, &theirs)| if rng.coin_flip() { theirs } else { own })
            .collect();

        Ok(Self::new(bias, weights, activation))
    }
}

impl Serialize for Neuron {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let human_readable = serializer.is_human_readable();
        let weights: Vec<PersistedFloat> = self.weights.iter().copied().map(PersistedFloat).collect();
        let leakage = self.activation.leakage().map(PersistedFloat);

        let mut state = serializer.serialize_struct("Neuron", 4)?;
        state.serialize_field("bias", &PersistedFloat(self.bias))?;
        state.serialize_field("weights", &weights)?;
        state.serialize_field("activation", &self.activation.kind())?;
        // Binary formats are positional and always carry the option.
        match leakage {
            None if human_readable => state.skip_field("leakage")?,
            _ => state.serialize_field("leakage", &leakage)?,
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for Neuron {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct NeuronData {
            bias: PersistedFloat,
            weights: Vec<PersistedFloat>,
            activation: ActivationKind,
            #[serde(default)]
            leakage: Option<PersistedFloat>,
        }

        let data = NeuronData::deserialize(deserializer)?;
        let activation = Activation::from_parts(data.activation, data.leakage.map(|l| l.0))
            .map_err(serde::de::Error::custom)?;
        let weights = data.weights.into_iter().map(|w| w.0).collect();

        Ok(Neuron::new(data.bias.0, weights, activation))
    }
}
