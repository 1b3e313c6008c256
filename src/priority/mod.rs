pub mod classifier;
pub mod dataset;
pub mod grade;
pub mod level;

pub use classifier::{GradeToPriorityClassifier, DEFAULT_MODEL_PATH};
pub use grade::Grade;
pub use level::PriorityLevel;
