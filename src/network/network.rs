use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use rand::Rng;
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::network::metadata::ModelMetadata;
use crate::network::spec::LayerSpec;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl Network {
    /// Builds a freshly initialized network from layer descriptions (input → output).
    pub fn new<R: Rng + ?Sized>(layer_specs: &[LayerSpec], rng: &mut R) -> Network {
        let layers = layer_specs.iter()
            .map(|s| Layer::new(s.size, s.input_size, s.activation, &mut *rng))
            .collect();
        Network { layers, metadata: None }
    }

    /// The architecture this network was built with.
    pub fn spec(&self) -> Vec<LayerSpec> {
        self.layers.iter()
            .map(|l| LayerSpec::new(l.size, l.input_size(), l.activator))
            .collect()
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.feed_from(&current);
        }
        current
    }

    /// Inference-only forward pass. Rejects inputs of the wrong length.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_size() {
            return Err(Error::InvalidInput(format!(
                "expected {} input values, got {}",
                self.input_size(),
                input.len()
            )));
        }
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.infer(&current);
        }
        Ok(current)
    }

    /// Checks that every matrix is well formed and that consecutive layers chain.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(Error::ShapeMismatch("network has no layers".into()));
        }
        let mut expected_input = self.input_size();
        for (i, layer) in self.layers.iter().enumerate() {
            if !layer.weights.is_well_formed() || !layer.biases.is_well_formed() {
                return Err(Error::ShapeMismatch(format!("layer {i}: ragged weight data")));
            }
            if layer.weights.rows != expected_input
                || layer.weights.cols != layer.size
                || layer.biases.rows != 1
                || layer.biases.cols != layer.size
            {
                return Err(Error::ShapeMismatch(format!(
                    "layer {i}: weights {}x{}, biases {}x{}, expected {}x{} and 1x{}",
                    layer.weights.rows, layer.weights.cols,
                    layer.biases.rows, layer.biases.cols,
                    expected_input, layer.size, layer.size,
                )));
            }
            expected_input = layer.size;
        }
        Ok(())
    }

    /// Fails if any weight or bias is NaN or infinite. JSON has no encoding
    /// for those, so such a network could not be loaded back.
    pub fn check_finite(&self) -> Result<()> {
        for (i, layer) in self.layers.iter().enumerate() {
            let finite = layer.weights.data.iter()
                .chain(layer.biases.data.iter())
                .flatten()
                .all(|x| x.is_finite());
            if !finite {
                return Err(Error::InvalidInput(format!("layer {i}: non-finite parameters")));
            }
        }
        Ok(())
    }

    /// Serializes architecture, weights and metadata to a pretty-printed JSON file.
    /// Parent directories are created as needed. Non-finite parameters are
    /// rejected before the file is touched.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        self.check_finite()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        info!(path = %path.display(), "saved model");
        Ok(())
    }

    /// Deserializes and validates a network previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut network: Network = serde_json::from_reader(reader)?;
        network.validate()?;
        network.reset_caches();
        info!(path = %path.display(), layers = network.layers.len(), "loaded model");
        Ok(network)
    }

    fn reset_caches(&mut self) {
        for layer in &mut self.layers {
            layer.reset_caches();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use rand::{rngs::StdRng, SeedableRng};

    fn small_net() -> Network {
        Network::new(
            &[
                LayerSpec::new(3, 2, ActivationFunction::ReLU),
                LayerSpec::new(2, 3, ActivationFunction::Softmax),
            ],
            &mut StdRng::seed_from_u64(9),
        )
    }

    #[test]
    fn spec_reflects_construction() {
        let net = small_net();
        assert_eq!(net.spec()[1], LayerSpec::new(2, 3, ActivationFunction::Softmax));
        assert_eq!(net.input_size(), 2);
        assert!(net.validate().is_ok());
    }

    #[test]
    fn predict_agrees_with_forward() {
        let mut net = small_net();
        let p = net.predict(&[1.0, 0.0]).unwrap();
        assert_eq!(p, net.forward(&[1.0, 0.0]));
    }

    #[test]
    fn predict_rejects_wrong_length() {
        let net = small_net();
        assert!(matches!(net.predict(&[1.0, 0.0, 0.0]), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn validate_catches_broken_chain() {
        let mut net = small_net();
        net.layers[1].weights = crate::math::matrix::Matrix::zeros(4, 2);
        assert!(matches!(net.validate(), Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn json_round_trip_preserves_weights() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("net.json");
        let net = small_net();
        net.save_json(&path).unwrap();
        let loaded = Network::load_json(&path).unwrap();
        assert_eq!(loaded.layers[0].weights, net.layers[0].weights);
        assert_eq!(loaded.layers[1].biases, net.layers[1].biases);
        assert_eq!(loaded.predict(&[0.0, 1.0]).unwrap(), net.predict(&[0.0, 1.0]).unwrap());
    }

    #[test]
    fn save_refuses_non_finite_weights() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nan.json");
        let mut net = small_net();
        net.layers[1].biases.data[0][0] = f64::NAN;
        assert!(matches!(net.save_json(&path), Err(Error::InvalidInput(_))));
        assert!(!path.exists());

        net.layers[1].biases.data[0][0] = 0.0;
        net.layers[0].weights.data[1][2] = f64::INFINITY;
        assert!(matches!(net.save_json(&path), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn load_of_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(Network::load_json(dir.path().join("absent.json")), Err(Error::Io(_))));
    }
}
