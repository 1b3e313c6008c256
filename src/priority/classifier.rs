use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::network::{LayerSpec, ModelMetadata, Network};
use crate::optim::adam::Adam;
use crate::train::{argmax, train_loop, EpochStats, TrainConfig};

use super::dataset;
use super::{Grade, PriorityLevel};

/// Where the binary writes the trained model when no `--output` is given.
pub const DEFAULT_MODEL_PATH: &str = "models/baseline_model.json";

/// Grade value the task application uses for "no grade"; it gets no suggestion.
pub const NO_GRADE: &str = "N/A";

/// Two-layer network (6 → hidden ReLU → 4 softmax) that learns the fixed
/// grade → priority table.
pub struct GradeToPriorityClassifier {
    network: Network,
    config: TrainConfig,
    optimizer: Adam,
    rng: StdRng,
}

impl GradeToPriorityClassifier {
    /// Builds an untrained classifier. Weights are Glorot-uniform, biases zero;
    /// `config.seed` makes both the initialization and the shuffle order reproducible.
    pub fn new(config: TrainConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = rng_for(&config);
        let mut network = Network::new(&architecture(config.hidden_units), &mut rng);
        network.metadata = Some(metadata(&config));
        let optimizer = Adam::new(config.learning_rate, config.beta1, config.beta2, config.epsilon);
        Ok(GradeToPriorityClassifier { network, config, optimizer, rng })
    }

    /// Fits the network to the six fixed examples for `config.epochs` epochs.
    /// Always completes; the returned history records loss and accuracy per epoch.
    pub fn train(&mut self) -> Vec<EpochStats> {
        let (inputs, labels) = dataset::encoded();
        info!(
            epochs = self.config.epochs,
            batch_size = self.config.batch_size,
            learning_rate = self.config.learning_rate,
            "training grade -> priority classifier"
        );
        train_loop(
            &mut self.network,
            &inputs,
            &labels,
            &mut self.optimizer,
            &self.config,
            &mut self.rng,
        )
    }

    /// Probability of each `PriorityLevel` (indexed by `PriorityLevel::index`).
    pub fn predict(&self, grade: Grade) -> Result<[f64; PriorityLevel::COUNT]> {
        let output = self.network.predict(&grade.one_hot())?;
        output.try_into().map_err(|v: Vec<f64>| {
            Error::ShapeMismatch(format!("expected {} outputs, got {}", PriorityLevel::COUNT, v.len()))
        })
    }

    /// Raw contract for callers holding an encoded vector. Anything that is not
    /// a length-6 one-hot vector is rejected rather than run through the network.
    pub fn predict_vector(&self, input: &[f64]) -> Result<Vec<f64>> {
        Grade::from_one_hot(input)?;
        self.network.predict(input)
    }

    /// Most probable priority for `grade`.
    pub fn classify(&self, grade: Grade) -> Result<PriorityLevel> {
        let distribution = self.predict(grade)?;
        PriorityLevel::from_index(argmax(&distribution))
            .ok_or_else(|| Error::ShapeMismatch("argmax outside priority range".into()))
    }

    /// Suggested priority for a grade as stored by the task application.
    /// `"N/A"` yields `None`; any other string must be a letter A–F.
    pub fn predict_priority(&self, grade: &str) -> Result<Option<PriorityLevel>> {
        if grade == NO_GRADE {
            return Ok(None);
        }
        let grade: Grade = grade.parse()?;
        self.classify(grade).map(Some)
    }

    /// Writes architecture, weights and label metadata as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.network.save_json(path)
    }

    /// Loads a model written by `save` and checks it has the grade → priority shape.
    ///
    /// The hyperparameters stored with the model are restored, so a later `train()`
    /// continues with the same settings. Adam moments start fresh and the shuffle
    /// RNG is reseeded from the stored seed (or entropy when there is none).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let network = Network::load_json(path)?;
        let hidden_units = network.layers.first().map_or(0, |l| l.size);
        let expected = architecture(hidden_units);
        if network.spec() != expected {
            return Err(Error::ShapeMismatch(format!(
                "expected architecture {:?}, found {:?}",
                expected,
                network.spec()
            )));
        }
        let stored = network.metadata.as_ref().and_then(|m| m.training.clone());
        let config = TrainConfig { hidden_units, ..stored.unwrap_or_default() };
        config.validate()?;
        let optimizer = Adam::new(config.learning_rate, config.beta1, config.beta2, config.epsilon);
        let rng = rng_for(&config);
        Ok(GradeToPriorityClassifier { network, config, optimizer, rng })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }
}

fn architecture(hidden_units: usize) -> [LayerSpec; 2] {
    [
        LayerSpec::new(hidden_units, Grade::COUNT, ActivationFunction::ReLU),
        LayerSpec::new(PriorityLevel::COUNT, hidden_units, ActivationFunction::Softmax),
    ]
}

fn rng_for(config: &TrainConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn metadata(config: &TrainConfig) -> ModelMetadata {
    ModelMetadata {
        description: Some("Suggests a task priority level from a letter grade".into()),
        input_labels: Some(Grade::ALL.iter().map(|g| g.label().to_string()).collect()),
        output_labels: Some(PriorityLevel::ALL.iter().map(|p| p.label().to_string()).collect()),
        training: Some(config.clone()),
    }
}
