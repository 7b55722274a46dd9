//! Feature preparation: numeric columns are standardised, categorical
//! columns are one-hot encoded, and the two blocks are concatenated.

use crate::domain::model::PropertyFeatures;
use crate::utils::error::{RentError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const NUMERIC_COLUMNS: [&str; 3] = ["bedrooms", "bathrooms", "squareft"];
pub const CATEGORICAL_COLUMNS: [&str; 2] = ["property_type", "postcode_area"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self> {
        let width = rows
            .first()
            .map(|r| r.len())
            .ok_or_else(|| RentError::training("cannot fit a scaler on zero rows"))?;
        let n = rows.len() as f64;

        let mut means = vec![0.0; width];
        for row in rows {
            for (m, v) in means.iter_mut().zip(row) {
                *m += v / n;
            }
        }

        let mut scales = vec![0.0; width];
        for row in rows {
            for ((s, v), m) in scales.iter_mut().zip(row).zip(&means) {
                *s += (v - m).powi(2) / n;
            }
        }
        // Constant columns keep their values centred but unscaled.
        for s in scales.iter_mut() {
            *s = if *s > 0.0 { s.sqrt() } else { 1.0 };
        }

        Ok(Self { means, scales })
    }

    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }
}

/// Unknown categories encode to all zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    pub categories: Vec<Vec<String>>,
}

impl OneHotEncoder {
    pub fn fit(rows: &[Vec<String>]) -> Result<Self> {
        let width = rows
            .first()
            .map(|r| r.len())
            .ok_or_else(|| RentError::training("cannot fit an encoder on zero rows"))?;

        let mut seen: Vec<BTreeSet<String>> = vec![BTreeSet::new(); width];
        for row in rows {
            for (set, value) in seen.iter_mut().zip(row) {
                set.insert(value.clone());
            }
        }

        Ok(Self {
            categories: seen.into_iter().map(|s| s.into_iter().collect()).collect(),
        })
    }

    pub fn output_width(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    pub fn transform(&self, row: &[&str]) -> Vec<f64> {
        let mut encoded = Vec::with_capacity(self.output_width());
        for (vocabulary, value) in self.categories.iter().zip(row) {
            encoded.extend(
                vocabulary
                    .iter()
                    .map(|category| if category.as_str() == *value { 1.0 } else { 0.0 }),
            );
        }
        encoded
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    pub scaler: StandardScaler,
    pub encoder: OneHotEncoder,
}

impl Preprocessor {
    pub fn fit(features: &[PropertyFeatures]) -> Result<Self> {
        let numeric: Vec<Vec<f64>> = features.iter().map(|f| f.numeric().to_vec()).collect();
        let categorical: Vec<Vec<String>> = features
            .iter()
            .map(|f| f.categorical().iter().map(|s| s.to_string()).collect())
            .collect();

        Ok(Self {
            scaler: StandardScaler::fit(&numeric)?,
            encoder: OneHotEncoder::fit(&categorical)?,
        })
    }

    pub fn transform(&self, features: &PropertyFeatures) -> Vec<f64> {
        let mut row = self.scaler.transform(&features.numeric());
        row.extend(self.encoder.transform(&features.categorical()));
        row
    }

    pub fn transform_all(&self, features: &[PropertyFeatures]) -> Vec<Vec<f64>> {
        features.iter().map(|f| self.transform(f)).collect()
    }

    /// Column names of the transformed matrix, e.g. `postcode_area=OX1`.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect();
        for (column, vocabulary) in CATEGORICAL_COLUMNS.iter().zip(&self.encoder.categories) {
            names.extend(vocabulary.iter().map(|v| format!("{}={}", column, v)));
        }
        names
    }
}
