//! Cleaning of raw rental exports: header normalisation, required column
//! checks, and removal of incomplete or unrealistic rows.

use crate::domain::model::CleanReport;
use crate::utils::error::{RentError, Result};
use std::path::Path;

pub const REQUIRED_COLUMNS: [&str; 4] = ["bedrooms", "bathrooms", "squareft", "price"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanRules {
    pub min_price: f64,
    pub max_price: f64,
    pub min_squareft: f64,
}

impl Default for CleanRules {
    fn default() -> Self {
        Self {
            min_price: 100.0,
            max_price: 10_000.0,
            min_squareft: 50.0,
        }
    }
}

impl CleanRules {
    /// Price bounds are inclusive, the remaining bounds strict.
    fn accepts(&self, bedrooms: f64, bathrooms: f64, squareft: f64, price: f64) -> bool {
        (self.min_price..=self.max_price).contains(&price)
            && bedrooms > 0.0
            && bathrooms > 0.0
            && squareft > self.min_squareft
    }
}

#[derive(Debug, Clone)]
pub struct CleanOutput {
    pub csv: String,
    pub report: CleanReport,
}

/// `"Square Ft "` becomes `"square_ft"`.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn clean_csv(input: &[u8], rules: &CleanRules) -> Result<CleanOutput> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
    tracing::debug!("📊 Columns in dataset: {:?}", headers);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h == *c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RentError::MissingColumnsError { columns: missing });
    }

    let position = |name: &str| headers.iter().position(|h| h == name);
    let [bed_idx, bath_idx, sqft_idx, price_idx] = REQUIRED_COLUMNS.map(|c| position(c));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&headers)?;

    let mut report = CleanReport::default();
    for row in reader.records() {
        let row = row?;
        report.input_rows += 1;

        let value = |idx: Option<usize>| parse_number(idx.and_then(|i| row.get(i)));
        let (Some(bedrooms), Some(bathrooms), Some(squareft), Some(price)) =
            (value(bed_idx), value(bath_idx), value(sqft_idx), value(price_idx))
        else {
            report.dropped_missing += 1;
            continue;
        };

        if !rules.accepts(bedrooms, bathrooms, squareft, price) {
            report.dropped_out_of_range += 1;
            continue;
        }

        let fields: Vec<&str> = (0..headers.len()).map(|i| row.get(i).unwrap_or("")).collect();
        writer.write_record(&fields)?;
        report.output_rows += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RentError::IoError(e.into_error()))?;
    let csv = String::from_utf8(bytes).map_err(|e| RentError::processing(e.to_string()))?;

    tracing::info!(
        "🧹 Cleaned {} rows: {} kept, {} missing values, {} out of range",
        report.input_rows,
        report.output_rows,
        report.dropped_missing,
        report.dropped_out_of_range
    );
    Ok(CleanOutput { csv, report })
}

pub fn clean_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q, rules: &CleanRules) -> Result<CleanReport> {
    let raw = std::fs::read(input.as_ref())?;
    let cleaned = clean_csv(&raw, rules)?;

    let output = output.as_ref();
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, cleaned.csv.as_bytes())?;
    tracing::info!("✅ Cleaned data saved to {}", output.display());
    Ok(cleaned.report)
}
