use crate::domain::model::{Listing, PropertyFeatures};
use crate::ml::forest::{ForestParams, RandomForest};
use crate::ml::metrics::{mean, mean_absolute_error, r2_score, root_mean_squared_error, std_dev};
use crate::ml::model::{ModelMetrics, RentModel};
use crate::ml::preprocess::Preprocessor;
use crate::ml::split::{k_fold_indices, train_test_split};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    pub forest: ForestParams,
    pub test_size: f64,
    pub cv_folds: usize,
    pub split_seed: u64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            forest: ForestParams::default(),
            test_size: 0.2,
            cv_folds: 5,
            split_seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub rows: usize,
    pub metrics: ModelMetrics,
    pub cv_scores: Vec<f64>,
    /// Estimate for a 2 bed, 1 bath flat in OX1, logged as a sanity check.
    pub sample_prediction: f64,
}

fn pick<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| items[i].clone()).collect()
}

fn fit_pipeline(features: &[PropertyFeatures], prices: &[f64], params: ForestParams) -> Result<RentModel> {
    let preprocessor = Preprocessor::fit(features)?;
    let forest = RandomForest::fit(&preprocessor.transform_all(features), prices, params)?;
    Ok(RentModel::new(preprocessor, forest))
}

/// Fits on a held-out split, scores it, and cross-validates R² over the whole dataset.
pub fn train_rental_model(listings: &[Listing], params: &TrainingParams) -> Result<(RentModel, TrainingReport)> {
    let rows = listings.len();
    tracing::info!("🧠 Training model on {} samples", rows);

    let features: Vec<PropertyFeatures> = listings.iter().map(Listing::features).collect();
    let prices: Vec<f64> = listings.iter().map(|l| l.price).collect();

    let (train_idx, test_idx) = train_test_split(rows, params.test_size, params.split_seed)?;
    let mut model = fit_pipeline(&pick(&features, &train_idx), &pick(&prices, &train_idx), params.forest)?;

    let y_test = pick(&prices, &test_idx);
    let y_pred = model.predict_all(&pick(&features, &test_idx))?;
    let mae = mean_absolute_error(&y_test, &y_pred);
    let rmse = root_mean_squared_error(&y_test, &y_pred);
    let r2 = r2_score(&y_test, &y_pred);

    let mut cv_scores = Vec::with_capacity(params.cv_folds);
    for (fold_train, fold_test) in k_fold_indices(rows, params.cv_folds)? {
        let fold_model = fit_pipeline(
            &pick(&features, &fold_train),
            &pick(&prices, &fold_train),
            params.forest,
        )?;
        let predicted = fold_model.predict_all(&pick(&features, &fold_test))?;
        cv_scores.push(r2_score(&pick(&prices, &fold_test), &predicted));
    }
    let cv_r2_mean = mean(&cv_scores);
    let cv_r2_std = std_dev(&cv_scores);

    tracing::info!("📈 Model performance:");
    tracing::info!("  MAE: £{:.2}", mae);
    tracing::info!("  RMSE: £{:.2}", rmse);
    tracing::info!("  R² score: {:.3}", r2);
    tracing::info!("  Cross-validation R²: {:.3} (±{:.3})", cv_r2_mean, cv_r2_std * 2.0);

    let metrics = ModelMetrics {
        mae,
        rmse,
        r2,
        cv_r2_mean,
        cv_r2_std,
        train_rows: train_idx.len(),
        test_rows: test_idx.len(),
    };
    model.metrics = Some(metrics.clone());

    let sample = PropertyFeatures::new(2, 1, 700, "Flat", "OX1")?;
    let sample_prediction = model.predict(&sample)?;
    tracing::info!("🏠 Sample prediction - 2 bed, 1 bath Flat in OX1: £{:.2}", sample_prediction);

    let report = TrainingReport {
        rows,
        metrics,
        cv_scores,
        sample_prediction,
    };
    Ok((model, report))
}

pub fn train_and_save<P: AsRef<Path>>(listings: &[Listing], params: &TrainingParams, model_path: P) -> Result<TrainingReport> {
    let (model, report) = train_rental_model(listings, params)?;
    model.save(model_path)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pricing::predict_rent;

    fn formula_dataset(n: usize) -> Vec<Listing> {
        let types = ["Flat", "House", "Studio"];
        let areas = ["OX1", "OX2", "OX3", "OX4", "OX5"];
        (0..n)
            .map(|i| {
                let bedrooms = (i % 4) as i64 + 1;
                let bathrooms = (i % 2) as i64 + 1;
                let squareft = 400 + 150 * bedrooms;
                let features = PropertyFeatures::new(
                    bedrooms,
                    bathrooms,
                    squareft,
                    types[i % 3],
                    areas[i % 5],
                )
                .unwrap();
                Listing {
                    bedrooms: bedrooms as f64,
                    bathrooms: bathrooms as f64,
                    squareft: squareft as f64,
                    property_type: features.property_type.clone(),
                    postcode_area: features.postcode_area.clone(),
                    price: predict_rent(&features),
                }
            })
            .collect()
    }

    fn quick_params() -> TrainingParams {
        TrainingParams {
            forest: ForestParams {
                n_estimators: 20,
                max_depth: 8,
                seed: 42,
            },
            ..TrainingParams::default()
        }
    }

    #[test]
    fn test_training_learns_the_formula() {
        let listings = formula_dataset(120);
        let (model, report) = train_rental_model(&listings, &quick_params()).unwrap();

        assert_eq!(report.rows, 120);
        assert_eq!(report.metrics.train_rows, 96);
        assert_eq!(report.metrics.test_rows, 24);
        assert_eq!(report.cv_scores.len(), 5);
        assert!(report.metrics.r2 > 0.8, "r2 was {}", report.metrics.r2);
        assert!(model.metrics.is_some());
        assert!(report.sample_prediction > 1000.0 && report.sample_prediction < 2500.0);
    }

    #[test]
    fn test_training_is_reproducible() {
        let listings = formula_dataset(60);
        let (_, a) = train_rental_model(&listings, &quick_params()).unwrap();
        let (_, b) = train_rental_model(&listings, &quick_params()).unwrap();
        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.sample_prediction, b.sample_prediction);
    }

    #[test]
    fn test_too_few_rows_fail() {
        let listings = formula_dataset(3);
        assert!(train_rental_model(&listings, &quick_params()).is_err());
    }
}
