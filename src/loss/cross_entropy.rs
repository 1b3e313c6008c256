/// Categorical cross-entropy paired with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Keeps log() finite when a predicted probability underflows to zero.
const EPS: f64 = 1e-12;

impl CrossEntropyLoss {
    /// L = -sum(expected[i] * ln(predicted[i] + eps))
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(p, e)| -e * (p + EPS).ln())
            .sum()
    }

    /// Gradient of Softmax + cross-entropy w.r.t. the pre-softmax logits:
    ///   ∂L/∂z_i = predicted[i] - expected[i]
    ///
    /// This is the initial delta of the backward pass; `ActivationFunction::Softmax`
    /// reports a derivative of 1.0 so the Jacobian is not applied twice.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(p, e)| p - e)
            .collect()
    }
}
