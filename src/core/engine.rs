use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting report build");

        tracing::info!("Extracting datasets...");
        let data = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} modules across {} library sections",
            data.modules.len(),
            data.libraries.len()
        );

        tracing::info!("Aggregating...");
        let report = self.pipeline.transform(data).await?;
        tracing::info!(
            "Summarized {} libraries and {} subject areas",
            report.libraries.len(),
            report.subject_areas.len()
        );

        tracing::info!("Writing report data...");
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Report data saved to: {}", output_path);

        Ok(output_path)
    }
}
