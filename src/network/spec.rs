use serde::{Serialize, Deserialize};
use crate::activation::activation::ActivationFunction;

/// Describes one dense layer of an architecture.
///
/// - `size`       — number of units in this layer
/// - `input_size` — output size of the previous layer, or the raw input
///                  dimension for the first layer
/// - `activation` — activation applied after the linear transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

impl LayerSpec {
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> LayerSpec {
        LayerSpec { size, input_size, activation }
    }
}
