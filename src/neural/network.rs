//! Network structure and forward propagation.

use super::layer::Layer;
use crate::error::{NetworkError, PersistError};
use crate::genetics::{Genetic, RandomGenerator};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Feedforward network: an ordered stack of layers over a fixed input size
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Network {
    /// Number of inputs accepted by the first layer
    #[serde(rename = "inputSize")]
    input_size: usize,
    layers: Vec<Layer>,
}

impl Network {
    /// Assemble a network, checking that each layer's fan-in matches the
    /// output of the layer before it.
    pub fn new(input_size: usize, layers: Vec<Layer>) -> Result<Self, NetworkError> {
        let mut expected = input_size;
        for (i, layer) in layers.iter().enumerate() {
            if let Some(fan_in) = layer.fan_in() {
                if fan_in != expected {
                    return Err(NetworkError::TopologyMismatch(format!(
                        "layer {} expects {} inputs but receives {}",
                        i, fan_in, expected
                    )));
                }
            }
            expected = layer.len();
        }
        Ok(Self { input_size, layers })
    }

    /// Layers chained by construction, see [`super::NetworkBuilder`].
    pub(super) fn assemble(input_size: usize, layers: Vec<Layer>) -> Self {
        Self { input_size, layers }
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Length of the vector returned by [`Network::fire`]
    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(self.input_size, Layer::len)
    }

    /// Neuron count per layer
    pub fn topology(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::len).collect()
    }

    /// Propagate `inputs` through every layer in order.
    pub fn fire(&self, inputs: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.check_inputs(inputs)?;
        self.layers
            .iter()
            .try_fold(inputs.to_vec(), |activation, layer| layer.fire(&activation))
    }

    /// Layers run in sequence; neurons within a layer run on the rayon pool.
    pub fn fire_parallel(&self, inputs: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.check_inputs(inputs)?;
        self.layers
            .iter()
            .try_fold(inputs.to_vec(), |activation, layer| {
                layer.fire_parallel(&activation)
            })
    }

    fn check_inputs(&self, inputs: &[f64]) -> Result<(), NetworkError> {
        if inputs.len() != self.input_size {
            return Err(NetworkError::InputSizeMismatch {
                expected: self.input_size,
                found: inputs.len(),
            });
        }
        Ok(())
    }

    /// Get total number of parameters (weights + biases)
    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Layer::parameter_count).sum()
    }

    /// Check if network is valid (no NaN/Inf)
    pub fn is_valid(&self) -> bool {
        self.layers.iter().all(Layer::is_valid)
    }

    /// Bitwise structural equality (NaN equals NaN)
    pub fn identical(&self, other: &Self) -> bool {
        self.input_size == other.input_size
            && self.layers.len() == other.layers.len()
            && self
                .layers
                .iter()
                .zip(&other.layers)
                .all(|(a, b)| a.identical(b))
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_bincode(&self) -> Result<Vec<u8>, PersistError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bincode(bytes: &[u8]) -> Result<Self, PersistError> {
        let data: NetworkData = bincode::deserialize(bytes)?;
        Ok(Network::new(data.input_size, data.layers)?)
    }
}

impl Genetic for Network {
    fn mutate<R: Rng>(&self, rate: f64, rng: &mut RandomGenerator<R>) -> Self {
        let layers = self.layers.iter().map(|l| l.mutate(rate, rng)).collect();
        Self {
            input_size: self.input_size,
            layers,
        }
    }

    fn crossover<R: Rng>(
        &self,
        mate: &Self,
        rng: &mut RandomGenerator<R>,
    ) -> Result<Self, NetworkError> {
        if mate.input_size != self.input_size {
            return Err(NetworkError::TopologyMismatch(format!(
                "network accepts {} inputs but mate accepts {}",
                self.input_size, mate.input_size
            )));
        }
        if mate.layers.len() != self.layers.len() {
            return Err(NetworkError::TopologyMismatch(format!(
                "network has {} layers but mate has {}",
                self.layers.len(),
                mate.layers.len()
            )));
        }

        let layers = self
            .layers
            .iter()
            .zip(&mate.layers)
            .enumerate()
            .map(|(i, (own, theirs))| {
                own.crossover(theirs, rng).map_err(|e| match e {
                    NetworkError::TopologyMismatch(msg) => {
                        NetworkError::TopologyMismatch(format!("layer {}: {}", i, msg))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            input_size: self.input_size,
            layers,
        })
    }
}

#[derive(Deserialize)]
struct NetworkData {
    #[serde(rename = "inputSize")]
    input_size: usize,
    layers: Vec<Layer>,
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = NetworkData::deserialize(deserializer)?;
        Network::new(data.input_size, data.layers).map_err(serde::de::Error::custom)
    }
}
