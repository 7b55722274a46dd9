// Regression pipeline: preprocessing, random forest, evaluation and persistence.

pub mod forest;
pub mod metrics;
pub mod model;
pub mod preprocess;
pub mod split;
pub mod train;

pub use forest::{ForestParams, RandomForest};
pub use model::{ModelMetrics, RentModel};
pub use preprocess::Preprocessor;
pub use train::{train_and_save, train_rental_model, TrainingParams, TrainingReport};
