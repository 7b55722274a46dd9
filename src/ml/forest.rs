//! Random forest regression over dense feature rows.
//!
//! Backed by smartcore's `RandomForestRegressor`: bootstrap samples per tree,
//! squared-error splits, and the mean of the trees as the prediction. Every
//! feature is a split candidate at every node.

use crate::utils::error::{RentError, Result};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

type Regressor = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 10,
            seed: 42,
        }
    }
}

impl ForestParams {
    fn regressor_parameters(&self, n_features: usize) -> RandomForestRegressorParameters {
        RandomForestRegressorParameters::default()
            .with_n_trees(self.n_estimators)
            .with_max_depth(u16::try_from(self.max_depth).unwrap_or(u16::MAX))
            .with_min_samples_split(2)
            .with_min_samples_leaf(1)
            .with_m(n_features)
            .with_seed(self.seed)
    }
}

fn to_matrix(rows: &[Vec<f64>]) -> DenseMatrix<f64> {
    DenseMatrix::from_2d_vec(&rows.to_vec())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RandomForest {
    pub params: ForestParams,
    n_features: usize,
    regressor: Regressor,
}

impl RandomForest {
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: ForestParams) -> Result<Self> {
        let n_features = match x.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => return Err(RentError::training("cannot fit a forest on zero rows")),
        };
        if x.len() != y.len() {
            return Err(RentError::training(format!(
                "feature rows ({}) and targets ({}) differ in length",
                x.len(),
                y.len()
            )));
        }
        if x.iter().any(|row| row.len() != n_features) {
            return Err(RentError::training("feature rows differ in width"));
        }
        if params.n_estimators == 0 {
            return Err(RentError::training("n_estimators must be at least 1"));
        }

        let regressor = Regressor::fit(
            &to_matrix(x),
            &y.to_vec(),
            params.regressor_parameters(n_features),
        )?;

        tracing::debug!(
            "🌲 Grew {} trees (max_depth={}) on {} rows",
            params.n_estimators,
            params.max_depth,
            x.len()
        );

        Ok(Self {
            params,
            n_features,
            regressor,
        })
    }

    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        self.predict_all(&[row.to_vec()])?
            .into_iter()
            .next()
            .ok_or_else(|| RentError::processing("forest returned no prediction"))
    }

    pub fn predict_all(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(row) = rows.iter().find(|row| row.len() != self.n_features) {
            return Err(RentError::invalid_feature(
                "row",
                format!("expected {} features, got {}", self.n_features, row.len()),
            ));
        }
        Ok(self.regressor.predict(&to_matrix(rows))?)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        let x: Vec<Vec<f64>> = (0..40).map(|i| vec![i as f64, (i % 3) as f64]).collect();
        let y: Vec<f64> = x.iter().map(|r| if r[0] < 20.0 { 500.0 } else { 1500.0 }).collect();
        (x, y)
    }

    #[test]
    fn test_forest_is_reproducible_for_a_seed() {
        let (x, y) = step_data();
        let params = ForestParams {
            n_estimators: 10,
            max_depth: 4,
            seed: 7,
        };
        let a = RandomForest::fit(&x, &y, params).unwrap();
        let b = RandomForest::fit(&x, &y, params).unwrap();
        assert_eq!(a.predict_all(&x).unwrap(), b.predict_all(&x).unwrap());
        assert_eq!(a.n_features(), 2);
    }

    #[test]
    fn test_forest_learns_a_step() {
        let (x, y) = step_data();
        let forest = RandomForest::fit(&x, &y, ForestParams::default()).unwrap();
        let low = forest.predict(&[2.0, 2.0]).unwrap();
        let high = forest.predict(&[38.0, 2.0]).unwrap();
        assert!(low < 700.0, "low prediction {}", low);
        assert!(high > 1300.0, "high prediction {}", high);
        for p in forest.predict_all(&x).unwrap() {
            assert!((500.0..=1500.0).contains(&p));
        }
    }

    #[test]
    fn test_forest_rejects_bad_input() {
        assert!(RandomForest::fit(&[], &[], ForestParams::default()).is_err());
        assert!(RandomForest::fit(&[vec![1.0], vec![2.0]], &[1.0], ForestParams::default()).is_err());

        let (x, y) = step_data();
        let zero_trees = ForestParams {
            n_estimators: 0,
            ..ForestParams::default()
        };
        assert!(RandomForest::fit(&x, &y, zero_trees).is_err());
    }

    #[test]
    fn test_predict_checks_row_width() {
        let (x, y) = step_data();
        let forest = RandomForest::fit(&x, &y, ForestParams { n_estimators: 3, ..ForestParams::default() }).unwrap();
        assert!(forest.predict(&[1.0]).is_err());
        assert!(forest.predict_all(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_json_round_trip_keeps_predictions() {
        let (x, y) = step_data();
        let forest = RandomForest::fit(&x, &y, ForestParams { n_estimators: 5, ..ForestParams::default() }).unwrap();
        let json = serde_json::to_string(&forest).unwrap();
        let loaded: RandomForest = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.params, forest.params);
        assert_eq!(loaded.predict_all(&x).unwrap(), forest.predict_all(&x).unwrap());
    }
}
