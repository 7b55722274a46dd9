use crate::domain::model::PropertyFeatures;
use crate::domain::ports::RentEstimator;
use crate::ml::forest::RandomForest;
use crate::ml::preprocess::Preprocessor;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub mae: f64,
    pub rmse: f64,
    pub r2: f64,
    pub cv_r2_mean: f64,
    pub cv_r2_std: f64,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Fitted preprocessing and regressor, persisted together as one JSON artifact.
#[derive(Debug, Serialize, Deserialize)]
pub struct RentModel {
    pub preprocessor: Preprocessor,
    pub forest: RandomForest,
    pub trained_at: DateTime<Utc>,
    pub metrics: Option<ModelMetrics>,
}

impl RentModel {
    pub fn new(preprocessor: Preprocessor, forest: RandomForest) -> Self {
        Self {
            preprocessor,
            forest,
            trained_at: Utc::now(),
            metrics: None,
        }
    }

    pub fn predict(&self, features: &PropertyFeatures) -> Result<f64> {
        self.forest.predict(&self.preprocessor.transform(features))
    }

    pub fn predict_all(&self, features: &[PropertyFeatures]) -> Result<Vec<f64>> {
        self.forest.predict_all(&self.preprocessor.transform_all(features))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(self)?;
        std::fs::write(path, json)?;
        tracing::info!("💾 Model saved to {}", path.display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let model: Self = serde_json::from_slice(&bytes)?;
        tracing::info!(
            "📦 Loaded model trained at {} ({} trees)",
            model.trained_at.to_rfc3339(),
            model.forest.params.n_estimators
        );
        Ok(model)
    }
}

impl RentEstimator for RentModel {
    fn name(&self) -> &'static str {
        "random_forest"
    }

    fn estimate(&self, features: &PropertyFeatures) -> Result<f64> {
        self.predict(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::forest::ForestParams;
    use tempfile::TempDir;

    fn tiny_model() -> RentModel {
        let features = vec![
            PropertyFeatures::new(1, 1, 450, "Flat", "OX4").unwrap(),
            PropertyFeatures::new(2, 1, 700, "Flat", "OX1").unwrap(),
            PropertyFeatures::new(3, 2, 1100, "House", "OX2").unwrap(),
            PropertyFeatures::new(0, 1, 300, "Studio", "OX5").unwrap(),
        ];
        let prices = vec![1100.0, 1700.0, 2300.0, 750.0];
        let pre = Preprocessor::fit(&features).unwrap();
        let params = ForestParams {
            n_estimators: 5,
            max_depth: 3,
            seed: 1,
        };
        let forest = RandomForest::fit(&pre.transform_all(&features), &prices, params).unwrap();
        RentModel::new(pre, forest)
    }

    #[test]
    fn test_save_and_load_preserve_predictions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models").join("rental_model.json");
        let model = tiny_model();
        model.save(&path).unwrap();

        let loaded = RentModel::load(&path).unwrap();
        let features = PropertyFeatures::new(2, 1, 650, "Flat", "OX3").unwrap();
        assert_eq!(model.predict(&features).unwrap(), loaded.predict(&features).unwrap());
        assert_eq!(loaded.trained_at, model.trained_at);
        assert_eq!(loaded.preprocessor, model.preprocessor);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = RentModel::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, crate::utils::error::RentError::IoError(_)));
    }

    #[test]
    fn test_estimator_name() {
        assert_eq!(tiny_model().name(), "random_forest");
    }
}
