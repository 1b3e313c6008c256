use serde::{Deserialize, Serialize};

use crate::train::train_config::TrainConfig;

/// Optional annotations attached to a saved Network.
/// All fields are Option<> so bare weight files still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelMetadata {
    pub description: Option<String>,
    /// Names of the one-hot input positions (e.g. ["A", ..., "F"]).
    pub input_labels: Option<Vec<String>>,
    /// Names of the output classes (e.g. ["Low", ..., "Urgent"]).
    pub output_labels: Option<Vec<String>>,
    /// Hyperparameters the weights were trained with.
    #[serde(default)]
    pub training: Option<TrainConfig>,
}
