use crate::config::toml_config::PipelineConfig;
use crate::data::clean::clean_csv;
use crate::data::dataset::parse_listings;
use crate::data::scrape::{records_to_csv, ListingScraper};
use crate::domain::model::{PipelineOutcome, Record, TransformResult};
use crate::domain::ports::{Pipeline, Storage};
use crate::ml::train_rental_model;
use crate::utils::error::{RentError, Result};
use std::time::Duration;

/// Scrapes fresh listings, cleans them, and retrains the model when enough rows survive.
pub struct RentPipeline<S: Storage> {
    storage: S,
    config: PipelineConfig,
    scraper: ListingScraper,
}

impl<S: Storage> RentPipeline<S> {
    pub fn new(storage: S, config: PipelineConfig) -> Self {
        let mut scraper = ListingScraper::new(config.source.endpoint.clone(), config.pages());
        if let Some(timeout) = config.source.timeout_seconds {
            scraper = scraper.with_timeout(Duration::from_secs(timeout));
        }
        Self {
            storage,
            config,
            scraper,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for RentPipeline<S> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::info!("1. Scraping new data from {}", self.scraper.endpoint());
        self.scraper.scrape().await
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        tracing::info!("2. Cleaning {} scraped listings", data.len());
        let raw_csv = records_to_csv(&data)?;
        let cleaned = clean_csv(raw_csv.as_bytes(), &self.config.clean_rules())?;
        let listings = parse_listings(cleaned.csv.as_bytes())?;

        Ok(TransformResult {
            raw_csv,
            cleaned_csv: cleaned.csv,
            listings,
            report: cleaned.report,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<PipelineOutcome> {
        let raw_path = self.config.raw_data_path();
        let cleaned_path = self.config.cleaned_data_path();

        self.storage.write_file(raw_path, result.raw_csv.as_bytes()).await?;
        self.storage
            .write_file(cleaned_path, result.cleaned_csv.as_bytes())
            .await?;
        tracing::debug!(
            "Wrote raw data to {} and cleaned data to {}",
            self.storage.resolve(raw_path),
            self.storage.resolve(cleaned_path)
        );

        let mut outcome = PipelineOutcome {
            raw_path: Some(self.storage.resolve(raw_path)),
            cleaned_path: Some(self.storage.resolve(cleaned_path)),
            cleaned_rows: result.listings.len(),
            model_path: None,
        };

        let min_rows = self.config.min_rows_for_training();
        if result.listings.len() < min_rows {
            tracing::warn!(
                "⚠️ Not enough data for retraining ({} rows, need {})",
                result.listings.len(),
                min_rows
            );
            return Ok(outcome);
        }

        tracing::info!("3. Retraining model...");
        let params = self.config.training_params();
        let listings = result.listings;
        let (model, _report) =
            tokio::task::spawn_blocking(move || train_rental_model(&listings, &params))
                .await
                .map_err(|e| RentError::training(format!("training task failed: {}", e)))??;

        let model_path = self.config.model_path();
        let bytes = serde_json::to_vec(&model)?;
        self.storage.write_file(model_path, &bytes).await?;
        tracing::info!("💾 Model saved to {}", self.storage.resolve(model_path));

        outcome.model_path = Some(self.storage.resolve(model_path));
        Ok(outcome)
    }
}
