use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::adam::Adam;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for exactly `config.epochs` epochs with Adam and
/// categorical cross-entropy, returning one `EpochStats` per epoch.
///
/// Sample order is reshuffled with `rng` at the start of every epoch. There is
/// no early stopping and no convergence check.
///
/// # Panics
/// Panics if `inputs` is empty, lengths mismatch, or `batch_size == 0`.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    optimizer: &mut Adam,
    config: &TrainConfig,
    rng: &mut R,
) -> Vec<EpochStats> {
    assert!(!inputs.is_empty(), "inputs must not be empty");
    assert_eq!(inputs.len(), labels.len(), "inputs and labels must have equal length");
    assert!(config.batch_size > 0, "batch_size must be at least 1");

    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        let train_loss = run_one_epoch(network, inputs, labels, optimizer, config.batch_size, rng);
        let train_accuracy = compute_accuracy(network, inputs, labels);
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        debug!(epoch, total = config.epochs, loss = train_loss, accuracy = train_accuracy, "epoch done");

        history.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            train_accuracy,
            elapsed_ms,
        });
    }

    if let Some(last) = history.last() {
        info!(
            epochs = last.epoch,
            steps = optimizer.iterations(),
            loss = last.train_loss,
            accuracy = last.train_accuracy,
            "training finished"
        );
    }

    history
}

/// Index of the maximum element in a slice.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Runs one full epoch of mini-batch Adam over the training data.
/// Returns the mean loss over all samples.
fn run_one_epoch<R: Rng + ?Sized>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    optimizer: &mut Adam,
    batch_size: usize,
    rng: &mut R,
) -> f64 {
    let n = inputs.len();
    let mut total_loss = 0.0;

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    for batch in indices.chunks(batch_size) {
        let mut acc_grads: Vec<(Matrix, Matrix)> = network.layers.iter()
            .map(|layer| (
                Matrix::zeros(layer.weights.rows, layer.weights.cols),
                Matrix::zeros(layer.biases.rows, layer.biases.cols),
            ))
            .collect();

        for &idx in batch {
            let input    = &inputs[idx];
            let expected = &labels[idx];

            let output = network.forward(input);
            total_loss += CrossEntropyLoss::loss(&output, expected);

            let mut delta = Matrix::row(&CrossEntropyLoss::derivative(&output, expected));

            // Backward pass.
            for i in (0..network.layers.len()).rev() {
                let input_for_layer = if i == 0 {
                    Matrix::row(input)
                } else {
                    network.layers[i - 1].neurons.clone()
                };

                let (w_grad, b_grad) = network.layers[i].compute_gradients(&delta, &input_for_layer);

                if i > 0 {
                    // Propagate δ_i through weights to get ∂L/∂a_{i-1}
                    delta = &b_grad * &network.layers[i].weights.transpose();
                }

                let (w_acc, b_acc) = &mut acc_grads[i];
                *w_acc = w_acc.clone() + w_grad;
                *b_acc = b_acc.clone() + b_grad;
            }
        }

        let inv_batch = 1.0 / batch.len() as f64;
        let averaged = acc_grads.into_iter()
            .map(|(w, b)| (w.map(|x| x * inv_batch), b.map(|x| x * inv_batch)))
            .collect();
        optimizer.step(&mut network.layers, averaged);
    }

    total_loss / n as f64
}

/// Fraction of samples classified correctly (argmax match).
fn compute_accuracy(network: &Network, inputs: &[Vec<f64>], labels: &[Vec<f64>]) -> f64 {
    let correct = inputs.iter().zip(labels.iter())
        .filter(|(input, label)| {
            network.predict(input)
                .map(|output| argmax(&output) == argmax(label))
                .unwrap_or(false)
        })
        .count();
    correct as f64 / inputs.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::network::spec::LayerSpec;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn argmax_picks_largest() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), 1);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn runs_exactly_the_configured_epochs() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut net = Network::new(
            &[
                LayerSpec::new(4, 2, ActivationFunction::ReLU),
                LayerSpec::new(2, 4, ActivationFunction::Softmax),
            ],
            &mut rng,
        );
        let inputs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let labels = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let config = TrainConfig { epochs: 7, batch_size: 2, ..TrainConfig::default() };
        let mut adam = Adam::new(0.01, 0.9, 0.999, 1e-7);

        let history = train_loop(&mut net, &inputs, &labels, &mut adam, &config, &mut rng);

        assert_eq!(history.len(), 7);
        assert_eq!(history.last().unwrap().epoch, 7);
        // One update per batch, one batch per epoch.
        assert_eq!(adam.iterations(), 7);
    }

    #[test]
    fn loss_falls_on_a_separable_problem() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut net = Network::new(
            &[
                LayerSpec::new(8, 3, ActivationFunction::ReLU),
                LayerSpec::new(3, 8, ActivationFunction::Softmax),
            ],
            &mut rng,
        );
        let inputs = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]];
        let labels = vec![vec![0.0, 0.0, 1.0], vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]];
        let config = TrainConfig { epochs: 100, ..TrainConfig::default() };
        let mut adam = Adam::new(config.learning_rate, config.beta1, config.beta2, config.epsilon);

        let history = train_loop(&mut net, &inputs, &labels, &mut adam, &config, &mut rng);

        assert!(history.last().unwrap().train_loss < history[0].train_loss);
        assert_eq!(adam.iterations(), 300);
    }
}
