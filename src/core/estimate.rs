//! Shapes a raw rent prediction into what the front end displays.

use crate::domain::model::PropertyFeatures;
use serde::{Deserialize, Serialize};

pub const MARKET_AVERAGE_RENT: f64 = 1250.0;
pub const RANGE_SPREAD: f64 = 200.0;
pub const RANGE_FLOOR: f64 = 300.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: f64,
    pub range: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub squareft: u32,
    pub property_type: String,
    pub postcode_area: String,
    pub comparison_text: String,
    pub comparison_width: f64,
    pub model: String,
}

/// Position of a prediction relative to the market average.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketComparison {
    pub percent: f64,
    pub text: String,
    pub width: f64,
}

impl MarketComparison {
    pub fn against_average(prediction: f64, market_avg: f64) -> Self {
        let percent = (prediction - market_avg) / market_avg * 100.0;
        let magnitude = percent.abs();

        let (direction, width) = if percent > 10.0 {
            ("above", 80.0 + f64::min(20.0, (percent - 10.0) / 5.0))
        } else if percent > 0.0 {
            ("above", 60.0 + (percent / 10.0) * 20.0)
        } else if percent > -10.0 {
            ("below", 40.0 + (magnitude / 10.0) * 20.0)
        } else {
            ("below", 20.0 + f64::min(20.0, (magnitude - 10.0) / 5.0))
        };

        Self {
            percent,
            text: format!("{:.1}% {} average", magnitude, direction),
            width,
        }
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Price band shown next to the estimate, never dropping below the floor.
pub fn price_range(prediction: f64) -> (i64, i64) {
    let lower = f64::max(RANGE_FLOOR, prediction - RANGE_SPREAD);
    let upper = prediction + RANGE_SPREAD;
    (lower.round_ties_even() as i64, upper.round_ties_even() as i64)
}

impl PredictionResponse {
    pub fn build(features: &PropertyFeatures, prediction: f64, model: &str) -> Self {
        let (lower, upper) = price_range(prediction);
        let comparison = MarketComparison::against_average(prediction, MARKET_AVERAGE_RENT);

        Self {
            prediction: round_to(prediction, 2),
            range: format!("£{} - £{}", lower, upper),
            bedrooms: features.bedrooms,
            bathrooms: features.bathrooms,
            squareft: features.squareft,
            property_type: features.property_type.clone(),
            postcode_area: features.postcode_area.clone(),
            comparison_text: comparison.text,
            comparison_width: comparison.width,
            model: model.to_string(),
        }
    }
}
