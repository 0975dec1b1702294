use crate::core::{Pipeline, RunSummary};
use crate::utils::error::Result;

/// Runs extract, transform and load once over the whole input directory.
pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting conversion...");

        tracing::debug!("Reading spreadsheets...");
        let extracted = self.pipeline.extract().await?;
        tracing::info!(
            "Read {} spreadsheet(s), {} skipped",
            extracted.reports.len(),
            extracted.failures.len()
        );

        tracing::debug!("Rendering documents...");
        let transformed = self.pipeline.transform(extracted).await?;
        tracing::debug!("Rendered {} document(s)", transformed.documents.len());

        tracing::debug!("Writing output...");
        let summary = self.pipeline.load(transformed).await?;
        tracing::info!(
            "Summary: {} successful, {} failed",
            summary.converted(),
            summary.failed()
        );

        Ok(summary)
    }
}
