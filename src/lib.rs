pub mod adapters;
pub mod config;
pub mod core;
pub mod data;
pub mod domain;
pub mod ml;
pub mod utils;
pub mod web;

pub use adapters::LocalStorage;
#[cfg(feature = "cli")]
pub use config::ServerConfig;
pub use config::PipelineConfig;

pub use core::{etl::EtlEngine, pipeline::RentPipeline, pricing::RuleBasedEstimator};
pub use ml::RentModel;
pub use utils::error::{RentError, Result};
