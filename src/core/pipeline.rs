use crate::config::AppConfig;
use crate::core::extractor::{augment_with_email, extract_laureates};
use crate::core::fetcher::RecordFetcher;
use crate::core::report::ReportWriter;
use crate::core::{ExtractedRecord, LaureateSource, LoadReport, Pipeline, RawRecord, Storage};

/// Which artifacts the load stage should produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputSelection {
    pub json: bool,
    pub spreadsheet: bool,
}

impl OutputSelection {
    pub fn any(&self) -> bool {
        self.json || self.spreadsheet
    }
}

/// Laureates API -> reduced records -> JSON / XLSX reports.
pub struct LaureatePipeline<S: LaureateSource, St: Storage> {
    fetcher: RecordFetcher<S>,
    writer: ReportWriter<St>,
    config: AppConfig,
    outputs: OutputSelection,
}

impl<S: LaureateSource, St: Storage> LaureatePipeline<S, St> {
    pub fn new(source: S, storage: St, config: AppConfig, outputs: OutputSelection) -> Self {
        let fetcher = RecordFetcher::new(source).with_retry_delay(config.retry_delay());
        Self {
            fetcher,
            writer: ReportWriter::new(storage),
            config,
            outputs,
        }
    }

    async fn save_json(&self, records: &[ExtractedRecord], report: &mut LoadReport) {
        let file_name = &self.config.output.json_file;
        let result = if self.config.output.augment_json_with_email {
            let augmented = augment_with_email(records, &self.config.app.email_suffix);
            self.writer.write_json(&augmented, file_name).await
        } else {
            self.writer.write_json(records, file_name).await
        };

        match result {
            Ok(path) => {
                tracing::info!("Data saved to {}", path);
                report.written.push(path);
            }
            Err(e) => {
                tracing::error!("Failed to save data to {}: {}", file_name, e);
                report.failed.push(file_name.clone());
            }
        }
    }

    async fn save_spreadsheet(&self, records: &[ExtractedRecord], report: &mut LoadReport) {
        let file_name = &self.config.output.xlsx_file;
        let result = match self.config.sheet_layout() {
            Ok(layout) => {
                self.writer
                    .write_spreadsheet(records, &layout, file_name)
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(path) => {
                tracing::info!("Data saved to {}", path);
                report.written.push(path);
            }
            Err(e) => {
                tracing::error!(
                    "Failed to save data to {}: {} ({})",
                    file_name,
                    e,
                    e.recovery_suggestion()
                );
                report.failed.push(file_name.clone());
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: LaureateSource, St: Storage> Pipeline for LaureatePipeline<S, St> {
    async fn extract(&self) -> Vec<RawRecord> {
        let mut query = self.config.api_params.clone();
        self.fetcher
            .fetch(&mut query, self.config.app.max_api_attempts)
            .await
    }

    fn transform(&self, data: &[RawRecord]) -> Vec<ExtractedRecord> {
        extract_laureates(data)
    }

    async fn load(&self, records: Vec<ExtractedRecord>) -> LoadReport {
        let mut report = LoadReport::default();

        if !self.outputs.any() {
            tracing::info!("No output requested, pass --json and/or --excel to save the data");
        }

        if self.outputs.json {
            self.save_json(&records, &mut report).await;
        }

        if self.outputs.spreadsheet {
            self.save_spreadsheet(&records, &mut report).await;
        }

        report
    }
}
