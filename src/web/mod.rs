//! HTTP front end: the estimate form, `/predict`, `/market-stats` and `/health`.

pub mod handlers;

use crate::core::estimate::PredictionResponse;
use crate::core::market::MarketStats;
use crate::core::pricing::RuleBasedEstimator;
use crate::data::dataset::read_listings;
use crate::domain::ports::RentEstimator;
use crate::ml::RentModel;
use crate::utils::error::{RentError, Result};
use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use handlers::PredictForm;
use std::path::Path;
use std::sync::Arc;

/// Read-only state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<dyn RentEstimator>,
    pub market: MarketStats,
}

impl AppState {
    pub fn new(estimator: Arc<dyn RentEstimator>, market: MarketStats) -> Self {
        Self { estimator, market }
    }

    pub fn with_formula() -> Self {
        Self::new(Arc::new(RuleBasedEstimator), MarketStats::default())
    }

    pub fn predict(&self, form: &PredictForm) -> Result<PredictionResponse> {
        let features = form.to_features()?;
        tracing::info!(
            "Received: {} bed, {} bath, {} sqft, {}, {}",
            features.bedrooms,
            features.bathrooms,
            features.squareft,
            features.property_type,
            features.postcode_area
        );

        let prediction = self.estimator.estimate(&features)?;
        if !prediction.is_finite() {
            return Err(RentError::processing(format!(
                "{} estimator returned {}",
                self.estimator.name(),
                prediction
            )));
        }
        Ok(PredictionResponse::build(&features, prediction, self.estimator.name()))
    }
}

/// Picks the trained model when it loads, the formula otherwise.
pub fn load_estimator(model_path: &str, formula_only: bool) -> Arc<dyn RentEstimator> {
    if formula_only {
        tracing::info!("📐 Using rule-based estimator (--formula-only)");
        return Arc::new(RuleBasedEstimator);
    }
    if !Path::new(model_path).exists() {
        tracing::warn!("⚠️ No model at {}, using rule-based estimator", model_path);
        return Arc::new(RuleBasedEstimator);
    }
    match RentModel::load(model_path) {
        Ok(model) => Arc::new(model),
        Err(e) => {
            tracing::warn!("⚠️ Could not load model from {}: {}. Using rule-based estimator", model_path, e);
            Arc::new(RuleBasedEstimator)
        }
    }
}

pub fn load_market_stats(dataset_path: Option<&str>) -> MarketStats {
    let Some(path) = dataset_path else {
        return MarketStats::default();
    };
    match read_listings(path) {
        Ok(listings) => {
            tracing::info!("📊 Market stats computed from {} listings in {}", listings.len(), path);
            MarketStats::from_listings(&listings)
        }
        Err(e) => {
            tracing::warn!("⚠️ Could not read dataset {}: {}. Using default market stats", path, e);
            MarketStats::default()
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::home))
        .route("/predict", web::post().to(handlers::predict))
        .route("/market-stats", web::get().to(handlers::market_stats))
        .route("/health", web::get().to(handlers::health));
}

pub struct Server;

impl Server {
    pub async fn run(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
        let data = web::Data::new(state);
        tracing::info!("Starting server... Go to http://localhost:{}", port);
        HttpServer::new(move || {
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .app_data(data.clone())
                .configure(configure)
        })
        .bind((host, port))?
        .run()
        .await
    }
}
