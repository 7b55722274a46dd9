use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "oxford-rent")]
#[command(about = "Rent estimation web service for Oxford properties")]
pub struct ServerConfig {
    #[arg(long, env = "RENT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "RENT_PORT", default_value = "5001")]
    pub port: u16,

    /// Trained model artifact; the rule-based formula is used when it cannot be loaded.
    #[arg(long, env = "RENT_MODEL_PATH", default_value = "models/rental_model.json")]
    pub model_path: String,

    /// Cleaned dataset used for /market-stats.
    #[arg(long, env = "RENT_DATASET_PATH")]
    pub dataset_path: Option<String>,

    /// Ignore the model file and always use the formula.
    #[arg(long)]
    pub formula_only: bool,

    #[arg(long, env = "RENT_ENV", default_value = "development")]
    pub environment: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            model_path: "models/rental_model.json".to_string(),
            dataset_path: None,
            formula_only: false,
            environment: "development".to_string(),
            verbose: false,
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_host("host", &self.host)?;
        validation::validate_range("port", self.port, 1, u16::MAX)?;
        validation::validate_path("model_path", &self.model_path)?;
        if let Some(dataset) = &self.dataset_path {
            validation::validate_path("dataset_path", dataset)?;
        }
        Ok(())
    }
}
