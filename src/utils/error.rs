use thiserror::Error;

#[derive(Error, Debug)]
pub enum RentError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    ExcelError(#[from] calamine::Error),

    #[error("Regression model error: {0}")]
    ModelError(#[from] smartcore::error::Failed),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Missing columns in dataset: {}", columns.join(", "))]
    MissingColumnsError { columns: Vec<String> },

    #[error("Invalid property feature '{field}': {reason}")]
    InvalidFeatureError { field: String, reason: String },

    #[error("Model training error: {message}")]
    TrainingError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

impl RentError {
    pub fn processing(message: impl Into<String>) -> Self {
        Self::ProcessingError {
            message: message.into(),
        }
    }

    pub fn training(message: impl Into<String>) -> Self {
        Self::TrainingError {
            message: message.into(),
        }
    }

    pub fn invalid_feature(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFeatureError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Short message for terminal output.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(_) => "Could not reach the listings source".to_string(),
            Self::CsvError(_) => "A CSV file could not be read or written".to_string(),
            Self::IoError(e) => format!("File system error: {}", e),
            Self::SerializationError(_) => "The model file is not valid JSON".to_string(),
            Self::ExcelError(_) => "The workbook could not be opened".to_string(),
            Self::ModelError(e) => format!("The regression model failed: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            Self::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            Self::MissingColumnsError { columns } => {
                format!("The dataset is missing columns: {}", columns.join(", "))
            }
            Self::InvalidFeatureError { field, reason } => {
                format!("Property attribute '{}' is invalid: {}", field, reason)
            }
            Self::TrainingError { message } => format!("Training failed: {}", message),
            Self::ProcessingError { message } => format!("Processing failed: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::HttpError(_) => "Check network access and the [source] endpoint",
            Self::CsvError(_) | Self::MissingColumnsError { .. } => {
                "Make sure the file has the columns bedrooms, bathrooms, squareft, price"
            }
            Self::IoError(_) => "Check that the path exists and is writable",
            Self::SerializationError(_) => "Retrain the model with train-model",
            Self::ExcelError(_) => "Make sure the input is an .xlsx, .xls or .ods workbook",
            Self::ModelError(_) => "Retrain the model with train-model",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration file and try again",
            Self::InvalidFeatureError { .. } => "Counts and sizes must be non-negative",
            Self::TrainingError { .. } => "Collect more cleaned rows before retraining",
            Self::ProcessingError { .. } => "Re-run with --verbose for more detail",
        }
    }
}

pub type Result<T> = std::result::Result<T, RentError>;
