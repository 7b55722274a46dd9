pub mod estimate;
pub mod etl;
pub mod market;
pub mod pipeline;
pub mod pricing;
pub mod scheduler;

pub use crate::domain::model::{Listing, PipelineOutcome, PropertyFeatures, Record, TransformResult};
pub use crate::domain::ports::{Pipeline, RentEstimator, Storage};
pub use crate::utils::error::Result;
