use crate::core::Pipeline;

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub fetched: usize,
    pub extracted: usize,
    pub written: Vec<String>,
    pub failed: Vec<String>,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract -> transform -> load. Stage failures are logged by the
    /// stages themselves, so a run always completes.
    pub async fn run(&self) -> RunSummary {
        let mut summary = RunSummary::default();

        tracing::info!("Extracting data...");
        let raw_data = self.pipeline.extract().await;
        summary.fetched = raw_data.len();

        if raw_data.is_empty() {
            tracing::error!("No data was retrieved from the API!");
        } else {
            tracing::info!("Transforming {} records...", raw_data.len());
            let records = self.pipeline.transform(&raw_data);
            summary.extracted = records.len();

            tracing::info!("Loading {} records...", records.len());
            let report = self.pipeline.load(records).await;
            summary.written = report.written;
            summary.failed = report.failed;
        }

        tracing::info!("Fetcher finished its work.");
        summary
    }
}
