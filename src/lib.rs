pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod priority;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use optim::adam::Adam;
pub use train::{train_loop, EpochStats, TrainConfig};
pub use priority::{Grade, GradeToPriorityClassifier, PriorityLevel, DEFAULT_MODEL_PATH};
pub use error::{Error, Result};
