use crate::domain::model::{PageQuery, RawRecord};
use crate::domain::ports::LaureateSource;
use std::time::Duration;

/// Walks the paginated source one page at a time.
///
/// `max_attempts` bounds the number of failed requests over the whole walk,
/// not per page. Once it is used up the records gathered so far are returned
/// as they are; a transport failure never reaches the caller.
pub struct RecordFetcher<S: LaureateSource> {
    source: S,
    retry_delay: Duration,
}

impl<S: LaureateSource> RecordFetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            retry_delay: Duration::ZERO,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn fetch(&self, query: &mut PageQuery, max_attempts: u32) -> Vec<RawRecord> {
        let mut fetched = Vec::new();
        let mut attempts = 0u32;

        tracing::info!(
            "Fetching laureates from year {} to {}",
            query.filter_text("nobelPrizeYear").unwrap_or_else(|| "?".to_string()),
            query.filter_text("yearTo").unwrap_or_else(|| "?".to_string())
        );

        while attempts < max_attempts {
            match self.source.get_page(query).await {
                Ok(page) if page.is_empty() => {
                    tracing::debug!("All data for the set parameters has been fetched");
                    break;
                }
                Ok(page) => {
                    tracing::debug!("Fetched {} records at offset {}", page.len(), query.offset);
                    fetched.extend(page);
                    query.advance();
                }
                Err(e) => {
                    attempts += 1;
                    tracing::error!(
                        "Attempt {}/{} to fetch data from API failed at offset {}: {}",
                        attempts,
                        max_attempts,
                        query.offset,
                        e
                    );

                    if attempts == max_attempts {
                        tracing::error!(
                            "Max number of attempts ({}) reached, keeping {} records fetched so far",
                            max_attempts,
                            fetched.len()
                        );
                        break;
                    }

                    if !self.retry_delay.is_zero() {
                        tracing::warn!("Retrying in {:?}", self.retry_delay);
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        tracing::info!("Fetched {} laureate records", fetched.len());
        fetched
    }
}
