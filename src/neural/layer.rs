//! A layer: neurons sharing one input vector.

use super::activation::ActivationKind;
use super::neuron::Neuron;
use crate::error::NetworkError;
use crate::genetics::{Genetic, RandomGenerator};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A single layer in the neural network
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layer {
    #[serde(rename = "neurons")]
    units: Vec<Neuron>,
}

impl Layer {
    /// Build a layer, checking that every neuron has the same fan-in.
    pub fn new(units: Vec<Neuron>) -> Result<Self, NetworkError> {
        if let Some(first) = units.first() {
            let fan_in = first.fan_in();
            if let Some(pos) = units.iter().position(|n| n.fan_in() != fan_in) {
                return Err(NetworkError::TopologyMismatch(format!(
                    "neuron {} has {} weights but neuron 0 has {}",
                    pos,
                    units[pos].fan_in(),
                    fan_in
                )));
            }
        }
        Ok(Self { units })
    }

    /// Generate `size` random neurons, each with `fan_in` weights.
    pub fn generate<R: Rng>(
        size: usize,
        fan_in: usize,
        eligible: &[ActivationKind],
        rng: &mut RandomGenerator<R>,
    ) -> Self {
        let units = (0..size)
            .map(|_| Neuron::generate(fan_in, eligible, rng))
            .collect();
        Self { units }
    }

    pub fn units(&self) -> &[Neuron] {
        &self.units
    }

    /// Output dimensionality
    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Input dimensionality, or `None` for a layer without neurons
    pub fn fan_in(&self) -> Option<usize> {
        self.units.first().map(Neuron::fan_in)
    }

    /// Fire every neuron on the same inputs; `output[i]` belongs to neuron `i`.
    pub fn fire(&self, inputs: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.units.iter().map(|unit| unit.fire(inputs)).collect()
    }

    /// Same as [`Layer::fire`], with neurons evaluated on the rayon pool.
    pub fn fire_parallel(&self, inputs: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.units.par_iter().map(|unit| unit.fire(inputs)).collect()
    }

    pub fn parameter_count(&self) -> usize {
        self.units.iter().map(|n| n.fan_in() + 1).sum()
    }

    pub fn is_valid(&self) -> bool {
        self.units.iter().all(Neuron::is_valid)
    }

    /// Bitwise structural equality (NaN equals NaN)
    pub fn identical(&self, other: &Self) -> bool {
        self.units.len() == other.units.len()
            && self
                .units
                .iter()
                .zip(&other.units)
                .all(|(a, b)| a.identical(b))
    }
}

impl Genetic for Layer {
    fn mutate<R: Rng>(&self, rate: f64, rng: &mut RandomGenerator<R>) -> Self {
        let units = self.units.iter().map(|n| n.mutate(rate, rng)).collect();
        Self { units }
    }

    fn crossover<R: Rng>(
        &self,
        mate: &Self,
        rng: &mut RandomGenerator<R>,
    ) -> Result<Self, NetworkError> {
        if mate.units.len() != self.units.len() {
            return Err(NetworkError::TopologyMismatch(format!(
                "layer has {} neurons but mate has {}",
                self.units.len(),
                mate.units.len()
            )));
        }

        let units = self
            .units
            .iter()
            .zip(&mate.units)
            .map(|(own, theirs)| own.crossover(theirs, rng))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { units })
    }
}

impl<'de> Deserialize<'de> for Layer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct LayerData {
            neurons: Vec<Neuron>,
        }

        let data = LayerData::deserialize(deserializer)?;
        Layer::new(data.neurons).map_err(serde::de::Error::custom)
    }
}
