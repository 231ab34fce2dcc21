//! Configuration for network generation and evolution.
//!
//! Supports YAML configuration files with sensible defaults.

use crate::neural::ActivationKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub genes: GeneConfig,
    pub network: NetworkConfig,
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bounds of the uniform distributions genes are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneConfig {
    pub bias_min: f64,
    pub bias_max: f64,
    pub weight_min: f64,
    pub weight_max: f64,
    /// Only used by units with an exponential linear activation
    pub leakage_min: f64,
    pub leakage_max: f64,
}

/// Shape of freshly generated networks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Number of network inputs
    pub input_size: usize,
    /// Layers from first hidden layer to output layer
    pub layers: Vec<LayerConfig>,
}

/// One layer of a generated network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub units: usize,
    /// Activations a unit of this layer may be assigned; empty means linear
    #[serde(default)]
    pub activations: Vec<ActivationKind>,
}

/// Evolution configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Probability of replacing each gene during mutation
    pub mutation_rate: f64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            genes: GeneConfig::default(),
            network: NetworkConfig::default(),
            evolution: EvolutionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for GeneConfig {
    fn default() -> Self {
        Self {
            bias_min: -1.0,
            bias_max: 1.0,
            weight_min: -1.0,
            weight_max: 1.0,
            leakage_min: 0.0,
            leakage_max: 1.0,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let hidden = vec![ActivationKind::ExponentialLinearUnit];
        Self {
            input_size: 200,
            layers: vec![
                LayerConfig {
                    units: 100,
                    activations: hidden.clone(),
                },
                LayerConfig {
                    units: 50,
                    activations: hidden,
                },
                LayerConfig {
                    units: 2,
                    activations: vec![ActivationKind::Linear],
                },
            ],
        }
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.05,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl GeneConfig {
    /// Check every range can be sampled. Equal bounds are allowed and pin
    /// the gene to that value.
    pub(crate) fn validate(&self) -> Result<(), String> {
        let ranges = [
            ("bias", self.bias_min, self.bias_max),
            ("weight", self.weight_min, self.weight_max),
            ("leakage", self.leakage_min, self.leakage_max),
        ];
        for (name, min, max) in ranges {
            if !min.is_finite() || !max.is_finite() {
                return Err(format!("{} bounds must be finite", name));
            }
            if min > max {
                return Err(format!("{}_min must not exceed {}_max", name, name));
            }
            if !(max - min).is_finite() {
                return Err(format!("{} range is too wide", name));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        self.genes.validate()?;
        if self.network.input_size == 0 {
            return Err("input_size must be > 0".to_string());
        }
        if self.network.layers.is_empty() {
            return Err("network needs at least one layer".to_string());
        }
        if let Some(i) = self.network.layers.iter().position(|l| l.units == 0) {
            return Err(format!("layer {} must have at least one unit", i));
        }
        let rate = self.evolution.mutation_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err("mutation_rate must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}
