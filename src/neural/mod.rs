//! Feedforward networks built from per-neuron activations.
//!
//! Implements:
//! - Activations with evolvable parameters
//! - Neurons, layers and networks as immutable values
//! - Random generation from a declared shape
//! - JSON and bincode persistence that keeps NaN and infinities intact

mod activation;
mod builder;
mod layer;
mod network;
mod neuron;
mod serde_float;

pub use activation::{Activation, ActivationKind};
pub use builder::NetworkBuilder;
pub use layer::Layer;
pub use network::Network;
pub use neuron::Neuron;
