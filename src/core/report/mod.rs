pub mod charts;
pub mod json;
pub mod spreadsheet;

use crate::domain::model::ExtractedRecord;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use spreadsheet::SheetLayout;

pub const DEFAULT_JSON_FILE: &str = "laureates_data.json";
pub const DEFAULT_XLSX_FILE: &str = "laureates_data.xlsx";

/// Renders reports and hands the bytes to storage.
pub struct ReportWriter<St: Storage> {
    storage: St,
}

impl<St: Storage> ReportWriter<St> {
    pub fn new(storage: St) -> Self {
        Self { storage }
    }

    pub async fn write_json(&self, records: &[ExtractedRecord], file_name: &str) -> Result<String> {
        let data = json::render_json(records)?;
        tracing::debug!("Writing {} bytes of JSON to {}", data.len(), file_name);
        self.storage.write_file(file_name, &data).await
    }

    pub async fn write_spreadsheet(
        &self,
        records: &[ExtractedRecord],
        layout: &SheetLayout,
        file_name: &str,
    ) -> Result<String> {
        let data = spreadsheet::render_spreadsheet(records, layout)?;
        tracing::debug!("Writing {} bytes of XLSX to {}", data.len(), file_name);
        self.storage.write_file(file_name, &data).await
    }
}
