use crate::domain::model::{ExtractedRecord, PageQuery, RawRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// One page of laureates per call; an empty page means the walk is over.
#[async_trait]
pub trait LaureateSource: Send + Sync {
    async fn get_page(&self, query: &PageQuery) -> Result<Vec<RawRecord>>;
}

/// Files produced by a load stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub written: Vec<String>,
    pub failed: Vec<String>,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Vec<RawRecord>;
    fn transform(&self, data: &[RawRecord]) -> Vec<ExtractedRecord>;
    async fn load(&self, records: Vec<ExtractedRecord>) -> LoadReport;
}
