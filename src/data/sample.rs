//! Reproducible synthetic Oxford rentals for local development and tests.

use crate::domain::model::{Listing, PostcodeArea, PropertyType};
use crate::core::pricing::postcode_adjustment;
use crate::utils::error::{RentError, Result};
use rand::distributions::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

const BEDROOMS: [u32; 5] = [0, 1, 2, 3, 4];
const BEDROOM_WEIGHTS: [f64; 5] = [0.1, 0.3, 0.4, 0.15, 0.05];
const BATHROOMS: [u32; 2] = [1, 2];
const BATHROOM_WEIGHTS: [f64; 2] = [0.7, 0.3];
const TYPE_WEIGHTS: [f64; 3] = [0.6, 0.3, 0.1];
const PRICE_NOISE_STD: f64 = 50.0;
const SIZE_NOISE_STD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleParams {
    pub rows: usize,
    pub seed: u64,
}

impl Default for SampleParams {
    fn default() -> Self {
        Self { rows: 200, seed: 42 }
    }
}

fn noise(std: f64) -> Result<Normal<f64>> {
    Normal::new(0.0, std).map_err(|e| RentError::processing(e.to_string()))
}

fn weighted(weights: &[f64]) -> Result<WeightedIndex<f64>> {
    WeightedIndex::new(weights).map_err(|e| RentError::processing(e.to_string()))
}

pub fn generate_listings(params: SampleParams) -> Result<Vec<Listing>> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let bedrooms_dist = weighted(&BEDROOM_WEIGHTS)?;
    let bathrooms_dist = weighted(&BATHROOM_WEIGHTS)?;
    let type_dist = weighted(&TYPE_WEIGHTS)?;
    let price_noise = noise(PRICE_NOISE_STD)?;
    let size_noise = noise(SIZE_NOISE_STD)?;

    let mut listings = Vec::with_capacity(params.rows);
    for _ in 0..params.rows {
        let bedrooms = BEDROOMS[bedrooms_dist.sample(&mut rng)];
        let bathrooms = BATHROOMS[bathrooms_dist.sample(&mut rng)];
        let property_type = PropertyType::ALL[type_dist.sample(&mut rng)];
        let postcode_area = PostcodeArea::ALL[rng.gen_range(0..PostcodeArea::ALL.len())];

        let mut price = 600.0 + bedrooms as f64 * 250.0 + bathrooms as f64 * 100.0;
        price += match property_type {
            PropertyType::House => 150.0,
            PropertyType::Studio => -100.0,
            PropertyType::Flat => 0.0,
        };
        price += postcode_adjustment(postcode_area.as_str());
        price += price_noise.sample(&mut rng);

        let squareft = (350.0 + bedrooms as f64 * 250.0 + size_noise.sample(&mut rng)).max(150.0);

        listings.push(Listing {
            bedrooms: bedrooms as f64,
            bathrooms: bathrooms as f64,
            squareft: squareft.round(),
            property_type: property_type.to_string(),
            postcode_area: postcode_area.to_string(),
            price: price.trunc(),
        });
    }

    tracing::info!("🎲 Created sample dataset with {} properties", listings.len());
    Ok(listings)
}
