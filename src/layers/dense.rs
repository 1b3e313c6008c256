use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    #[serde(skip)]
    pub neurons: Matrix,
    #[serde(skip)]
    pre_neurons: Matrix,  // pre-activation values (z = xW + b) needed for correct derivative
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    /// Glorot-uniform weights of shape (input_size, size) and zero biases.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        Layer {
            size,
            neurons: Matrix::zeros(1, size),
            pre_neurons: Matrix::zeros(1, size),
            weights: Matrix::glorot_uniform(input_size, size, rng),
            biases: Matrix::zeros(1, size),
            activator: activation
        }
    }

    /// Restores the forward caches that are skipped during serialization.
    pub fn reset_caches(&mut self) {
        self.neurons = Matrix::zeros(1, self.size);
        self.pre_neurons = Matrix::zeros(1, self.size);
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Training forward pass; caches z and a for `compute_gradients`.
    pub fn feed_from(&mut self, input: &[f64]) -> Vec<f64> {
        let z = self.linear(input);
        let a = self.activator.apply(&z.data[0]);
        self.pre_neurons = z;
        self.neurons = Matrix::row(&a);
        a
    }

    /// Forward pass without touching the training caches.
    pub fn infer(&self, input: &[f64]) -> Vec<f64> {
        let z = self.linear(input);
        self.activator.apply(&z.data[0])
    }

    fn linear(&self, input: &[f64]) -> Matrix {
        &Matrix::row(input) * &self.weights + self.biases.clone()
    }

    /// Computes gradient adjustments. Returns (weights_grad, biases_grad).
    /// `next_layer_delta` is ∂L/∂a for this layer (error in activation space).
    pub fn compute_gradients(
        &self,
        next_layer_delta: &Matrix,
        inputs: &Matrix,
    ) -> (Matrix, Matrix) {
        // Use pre-activation z so that derivative(z) = σ'(z) is computed correctly
        let act_derivative = self.pre_neurons.map(|x| self.activator.derivative(x));
        // δ = error ⊙ σ'(z)
        let layer_delta = next_layer_delta.hadamard(&act_derivative);

        let weights_adjustment = &inputs.transpose() * &layer_delta;
        let biases_adjustment = layer_delta;

        (weights_adjustment, biases_adjustment)
    }
}
