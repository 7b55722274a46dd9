use crate::domain::model::{PipelineOutcome, PropertyFeatures, Record, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Location of `path` as seen by other tools, used in logs and outcomes.
    fn resolve(&self, path: &str) -> String;
}

/// Turns property attributes into a monthly rent.
pub trait RentEstimator: Send + Sync {
    fn name(&self) -> &'static str;
    fn estimate(&self, features: &PropertyFeatures) -> Result<f64>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<PipelineOutcome>;
}
