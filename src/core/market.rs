use crate::domain::model::Listing;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    pub avg_rent: i64,
    pub total_properties: usize,
    pub expensive_area: String,
    pub expensive_area_price: i64,
    pub cheap_area: String,
    pub cheap_area_price: i64,
}

impl Default for MarketStats {
    /// Figures shown when no cleaned dataset is available.
    fn default() -> Self {
        Self {
            avg_rent: 1250,
            total_properties: 42,
            expensive_area: "OX1".to_string(),
            expensive_area_price: 1450,
            cheap_area: "OX5".to_string(),
            cheap_area_price: 950,
        }
    }
}

impl MarketStats {
    pub fn from_listings(listings: &[Listing]) -> Self {
        if listings.is_empty() {
            return Self::default();
        }

        let total: f64 = listings.iter().map(|l| l.price).sum();
        let avg_rent = (total / listings.len() as f64).round() as i64;

        let mut by_area: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for listing in listings {
            let area = listing.postcode_area.trim();
            if area.is_empty() {
                continue;
            }
            let entry = by_area.entry(area).or_insert((0.0, 0));
            entry.0 += listing.price;
            entry.1 += 1;
        }

        let means: Vec<(&str, f64)> = by_area
            .into_iter()
            .map(|(area, (sum, count))| (area, sum / count as f64))
            .collect();

        // Ties resolve to the lexically first area, since BTreeMap iterates in order.
        let expensive = means
            .iter()
            .fold(None::<(&str, f64)>, |best, &(area, mean)| match best {
                Some((_, m)) if m >= mean => best,
                _ => Some((area, mean)),
            });
        let cheap = means
            .iter()
            .fold(None::<(&str, f64)>, |best, &(area, mean)| match best {
                Some((_, m)) if m <= mean => best,
                _ => Some((area, mean)),
            });

        let defaults = Self::default();
        let (expensive_area, expensive_area_price) = expensive
            .map(|(a, m)| (a.to_string(), m.round() as i64))
            .unwrap_or((defaults.expensive_area, defaults.expensive_area_price));
        let (cheap_area, cheap_area_price) = cheap
            .map(|(a, m)| (a.to_string(), m.round() as i64))
            .unwrap_or((defaults.cheap_area, defaults.cheap_area_price));

        Self {
            avg_rent,
            total_properties: listings.len(),
            expensive_area,
            expensive_area_price,
            cheap_area,
            cheap_area_price,
        }
    }
}
