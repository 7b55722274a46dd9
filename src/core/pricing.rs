//! Rule-based rent formula built from average Oxford rents.

use crate::domain::model::{PostcodeArea, PropertyFeatures, PropertyType};
use crate::domain::ports::RentEstimator;
use crate::utils::error::Result;

const BASE_PRICE: f64 = 800.0;
const PER_BEDROOM: f64 = 250.0;
const PER_BATHROOM: f64 = 100.0;
const PER_SQUARE_FOOT: f64 = 0.2;

pub fn property_type_adjustment(property_type: &str) -> f64 {
    match property_type.parse::<PropertyType>() {
        Ok(PropertyType::House) => 200.0,
        Ok(PropertyType::Studio) => -100.0,
        Ok(PropertyType::Flat) | Err(_) => 0.0,
    }
}

/// OX1 is the most expensive area, OX5 carries no premium.
pub fn postcode_adjustment(postcode_area: &str) -> f64 {
    match postcode_area.parse::<PostcodeArea>() {
        Ok(PostcodeArea::Ox1) => 200.0,
        Ok(PostcodeArea::Ox2) => 150.0,
        Ok(PostcodeArea::Ox3) => 100.0,
        Ok(PostcodeArea::Ox4) => 50.0,
        Ok(PostcodeArea::Ox5) | Err(_) => 0.0,
    }
}

pub fn predict_rent(features: &PropertyFeatures) -> f64 {
    let mut price = BASE_PRICE
        + features.bedrooms as f64 * PER_BEDROOM
        + features.bathrooms as f64 * PER_BATHROOM
        + features.squareft as f64 * PER_SQUARE_FOOT;

    price += property_type_adjustment(&features.property_type);
    price += postcode_adjustment(&features.postcode_area);
    price
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedEstimator;

impl RentEstimator for RuleBasedEstimator {
    fn name(&self) -> &'static str {
        "formula"
    }

    fn estimate(&self, features: &PropertyFeatures) -> Result<f64> {
        Ok(predict_rent(features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(bed: i64, bath: i64, sqft: i64, kind: &str, area: &str) -> PropertyFeatures {
        PropertyFeatures::new(bed, bath, sqft, kind, area).unwrap()
    }

    #[test]
    fn test_two_bed_flat_in_ox1() {
        let price = predict_rent(&features(2, 1, 700, "Flat", "OX1"));
        assert!((price - 1740.0).abs() < 1e-9);
    }

    #[test]
    fn test_house_and_studio_adjustments() {
        let flat = predict_rent(&features(1, 1, 500, "Flat", "OX5"));
        let house = predict_rent(&features(1, 1, 500, "House", "OX5"));
        let studio = predict_rent(&features(1, 1, 500, "Studio", "OX5"));
        assert!((house - flat - 200.0).abs() < 1e-9);
        assert!((flat - studio - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_postcode_ladder() {
        let prices: Vec<f64> = ["OX1", "OX2", "OX3", "OX4", "OX5"]
            .iter()
            .map(|area| predict_rent(&features(0, 0, 0, "Flat", area)))
            .collect();
        assert_eq!(prices, vec![1000.0, 950.0, 900.0, 850.0, 800.0]);
    }

    #[test]
    fn test_unknown_labels_carry_no_adjustment() {
        let known = predict_rent(&features(1, 1, 0, "Flat", "OX5"));
        let unknown = predict_rent(&features(1, 1, 0, "Bungalow", "OX9"));
        assert_eq!(known, unknown);
    }

    #[test]
    fn test_estimator_is_deterministic() {
        let input = features(3, 2, 1100, "House", "OX2");
        let first = RuleBasedEstimator.estimate(&input).unwrap();
        let second = RuleBasedEstimator.estimate(&input).unwrap();
        assert_eq!(first, second);
        assert!((first - 2320.0).abs() < 1e-9);
    }
}
