use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    #[serde(rename = "relu")]
    ReLU,
    /// Softmax is a vector-valued activation; `apply()` handles it over the
    /// whole row instead of element-wise.
    #[serde(rename = "softmax")]
    Softmax,
}

impl ActivationFunction {
    /// Applies the activation to one row of pre-activation values.
    pub fn apply(&self, z: &[f64]) -> Vec<f64> {
        match self {
            ActivationFunction::ReLU => z.iter().map(|&x| if x > 0.0 { x } else { 0.0 }).collect(),
            ActivationFunction::Softmax => softmax(z),
        }
    }

    /// Element-wise derivative of the activation.
    ///
    /// For `Softmax`, the layer pairs it with cross-entropy and the combined
    /// gradient is `predicted - expected` (already computed by
    /// `CrossEntropyLoss::derivative()`).  Returning `1.0` here lets
    /// `compute_gradients()` pass that delta through unchanged without
    /// double-applying the Jacobian.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Softmax => 1.0,
        }
    }
}

/// Numerically stable softmax: the row maximum is subtracted before `exp`.
pub fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
