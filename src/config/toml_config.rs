use crate::data::clean::CleanRules;
use crate::ml::{ForestParams, TrainingParams};
use crate::utils::error::{RentError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Settings for the scrape → clean → retrain pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub pipeline: PipelineInfo,
    pub source: SourceConfig,
    pub paths: PathsConfig,
    #[serde(default)]
    pub cleaning: CleaningConfig,
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub pages: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Every other path is relative to this directory.
    pub base_dir: String,
    pub raw_data: Option<String>,
    pub cleaned_data: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningConfig {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_squareft: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub min_rows: Option<usize>,
    pub n_estimators: Option<usize>,
    pub max_depth: Option<usize>,
    pub seed: Option<u64>,
    pub test_size: Option<f64>,
    pub cv_folds: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub daily_at: Option<String>,
}

fn env_var_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| regex::Regex::new(r"\$\{([^}]+)\}").expect("static pattern compiles"))
}

impl PipelineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RentError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RentError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn pages(&self) -> usize {
        self.source.pages.unwrap_or(2)
    }

    pub fn raw_data_path(&self) -> &str {
        self.paths.raw_data.as_deref().unwrap_or("data/oxford_rentals_raw.csv")
    }

    pub fn cleaned_data_path(&self) -> &str {
        self.paths
            .cleaned_data
            .as_deref()
            .unwrap_or("data/oxford_rentals_cleaned.csv")
    }

    pub fn model_path(&self) -> &str {
        self.paths.model.as_deref().unwrap_or("models/rental_model.json")
    }

    pub fn min_rows_for_training(&self) -> usize {
        self.training.min_rows.unwrap_or(20)
    }

    pub fn clean_rules(&self) -> CleanRules {
        let defaults = CleanRules::default();
        CleanRules {
            min_price: self.cleaning.min_price.unwrap_or(defaults.min_price),
            max_price: self.cleaning.max_price.unwrap_or(defaults.max_price),
            min_squareft: self.cleaning.min_squareft.unwrap_or(defaults.min_squareft),
        }
    }

    pub fn training_params(&self) -> TrainingParams {
        let defaults = TrainingParams::default();
        TrainingParams {
            forest: ForestParams {
                n_estimators: self.training.n_estimators.unwrap_or(defaults.forest.n_estimators),
                max_depth: self.training.max_depth.unwrap_or(defaults.forest.max_depth),
                seed: self.training.seed.unwrap_or(defaults.forest.seed),
            },
            test_size: self.training.test_size.unwrap_or(defaults.test_size),
            cv_folds: self.training.cv_folds.unwrap_or(defaults.cv_folds),
            split_seed: self.training.seed.unwrap_or(defaults.split_seed),
        }
    }

    pub fn daily_at(&self) -> Result<NaiveTime> {
        validation::parse_time_of_day(
            "schedule.daily_at",
            self.schedule.daily_at.as_deref().unwrap_or("02:00"),
        )
    }

    /// Fails on the first field still holding an unresolved `${VAR}`.
    fn check_resolved(&self) -> Result<()> {
        let fields = [
            ("source.endpoint", self.source.endpoint.as_str()),
            ("paths.base_dir", self.paths.base_dir.as_str()),
        ];
        for (field, value) in fields {
            if let Some(caps) = env_var_pattern().captures(value) {
                return Err(RentError::MissingConfigError {
                    field: format!("{} (environment variable {} is not set)", field, &caps[1]),
                });
            }
        }
        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        self.check_resolved()?;
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_positive_number("source.pages", self.pages(), 1)?;
        validation::validate_path("paths.base_dir", &self.paths.base_dir)?;
        validation::validate_path("paths.raw_data", self.raw_data_path())?;
        validation::validate_path("paths.cleaned_data", self.cleaned_data_path())?;
        validation::validate_path("paths.model", self.model_path())?;

        let rules = self.clean_rules();
        if rules.min_price > rules.max_price {
            return Err(RentError::ConfigValidationError {
                field: "cleaning".to_string(),
                message: format!(
                    "min_price ({}) is above max_price ({})",
                    rules.min_price, rules.max_price
                ),
            });
        }

        let params = self.training_params();
        validation::validate_positive_number("training.n_estimators", params.forest.n_estimators, 1)?;
        validation::validate_positive_number("training.cv_folds", params.cv_folds, 2)?;
        validation::validate_range("training.test_size", params.test_size, 0.05, 0.5)?;
        if self.min_rows_for_training() < params.cv_folds {
            return Err(RentError::InvalidConfigValueError {
                field: "training.min_rows".to_string(),
                value: self.min_rows_for_training().to_string(),
                reason: format!("must be at least training.cv_folds ({})", params.cv_folds),
            });
        }
        self.daily_at()?;
        Ok(())
    }
}

impl Validate for PipelineConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
