use crate::utils::error::{RentError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Loosely typed row as delivered by the listings source, before cleaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: BTreeMap<String, serde_json::Value>,
}

/// One row of a rentals dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub squareft: f64,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub postcode_area: String,
    pub price: f64,
}

impl Listing {
    pub fn features(&self) -> PropertyFeatures {
        PropertyFeatures {
            bedrooms: self.bedrooms.max(0.0).round() as u32,
            bathrooms: self.bathrooms.max(0.0).round() as u32,
            squareft: self.squareft.max(0.0).round() as u32,
            property_type: self.property_type.clone(),
            postcode_area: self.postcode_area.clone(),
        }
    }
}

/// The five inputs every estimator works from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFeatures {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub squareft: u32,
    pub property_type: String,
    pub postcode_area: String,
}

impl PropertyFeatures {
    /// Builds features from raw (possibly negative) form values.
    pub fn new(
        bedrooms: i64,
        bathrooms: i64,
        squareft: i64,
        property_type: impl Into<String>,
        postcode_area: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            bedrooms: non_negative("bedrooms", bedrooms)?,
            bathrooms: non_negative("bathrooms", bathrooms)?,
            squareft: non_negative("squareft", squareft)?,
            property_type: property_type.into(),
            postcode_area: postcode_area.into(),
        })
    }

    pub fn numeric(&self) -> [f64; 3] {
        [
            self.bedrooms as f64,
            self.bathrooms as f64,
            self.squareft as f64,
        ]
    }

    pub fn categorical(&self) -> [&str; 2] {
        [self.property_type.as_str(), self.postcode_area.as_str()]
    }
}

fn non_negative(field: &str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        RentError::invalid_feature(field, format!("must be a non-negative count, got {}", value))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Flat,
    House,
    Studio,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [PropertyType::Flat, PropertyType::House, PropertyType::Studio];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Flat => "Flat",
            PropertyType::House => "House",
            PropertyType::Studio => "Studio",
        }
    }
}

impl FromStr for PropertyType {
    type Err = RentError;

    fn from_str(s: &str) -> Result<Self> {
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RentError::invalid_feature("property_type", format!("unknown type '{}'", s)))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PostcodeArea {
    Ox1,
    Ox2,
    Ox3,
    Ox4,
    Ox5,
}

impl PostcodeArea {
    pub const ALL: [PostcodeArea; 5] = [
        PostcodeArea::Ox1,
        PostcodeArea::Ox2,
        PostcodeArea::Ox3,
        PostcodeArea::Ox4,
        PostcodeArea::Ox5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostcodeArea::Ox1 => "OX1",
            PostcodeArea::Ox2 => "OX2",
            PostcodeArea::Ox3 => "OX3",
            PostcodeArea::Ox4 => "OX4",
            PostcodeArea::Ox5 => "OX5",
        }
    }
}

impl FromStr for PostcodeArea {
    type Err = RentError;

    fn from_str(s: &str) -> Result<Self> {
        PostcodeArea::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| RentError::invalid_feature("postcode_area", format!("unknown area '{}'", s)))
    }
}

impl fmt::Display for PostcodeArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row counts produced by a cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanReport {
    pub input_rows: usize,
    pub dropped_missing: usize,
    pub dropped_out_of_range: usize,
    pub output_rows: usize,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub raw_csv: String,
    pub cleaned_csv: String,
    pub listings: Vec<Listing>,
    pub report: CleanReport,
}

/// What a pipeline run left behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutcome {
    pub raw_path: Option<String>,
    pub cleaned_path: Option<String>,
    pub cleaned_rows: usize,
    pub model_path: Option<String>,
}

impl PipelineOutcome {
    pub fn retrained(&self) -> bool {
        self.model_path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_bedrooms_rejected() {
        let err = PropertyFeatures::new(-1, 1, 700, "Flat", "OX1").unwrap_err();
        assert!(matches!(err, RentError::InvalidFeatureError { ref field, .. } if field == "bedrooms"));
    }

    #[test]
    fn test_listing_to_features_rounds_counts() {
        let listing = Listing {
            bedrooms: 2.0,
            bathrooms: 1.0,
            squareft: 699.6,
            property_type: "Flat".to_string(),
            postcode_area: "OX2".to_string(),
            price: 1500.0,
        };
        let features = listing.features();
        assert_eq!(features.bedrooms, 2);
        assert_eq!(features.squareft, 700);
        assert_eq!(features.categorical(), ["Flat", "OX2"]);
    }

    #[test]
    fn test_category_labels_parse() {
        assert_eq!("House".parse::<PropertyType>().unwrap(), PropertyType::House);
        assert_eq!("OX4".parse::<PostcodeArea>().unwrap(), PostcodeArea::Ox4);
        assert!("Castle".parse::<PropertyType>().is_err());
        assert!("ox1".parse::<PostcodeArea>().is_err());
    }
}
