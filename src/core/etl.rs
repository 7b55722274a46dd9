use crate::domain::model::PipelineOutcome;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<PipelineOutcome> {
        let started = Instant::now();
        tracing::info!("🚀 Starting data pipeline...");

        let raw_data = self.pipeline.extract().await?;
        if raw_data.is_empty() {
            tracing::warn!("❌ No data collected");
            return Ok(PipelineOutcome::default());
        }
        tracing::info!("Extracted {} records", raw_data.len());

        let transformed = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Kept {} of {} rows after cleaning",
            transformed.report.output_rows,
            transformed.report.input_rows
        );

        let outcome = self.pipeline.load(transformed).await?;
        tracing::info!(
            "✅ Pipeline completed in {:?} (retrained: {})",
            started.elapsed(),
            outcome.retrained()
        );
        Ok(outcome)
    }
}
