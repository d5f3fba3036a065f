pub mod etl;
pub mod extractor;
pub mod fetcher;
pub mod headers;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{ExtractedPrize, ExtractedRecord, PageQuery, RawRecord};
pub use crate::domain::ports::{LaureateSource, LoadReport, Pipeline, Storage};
pub use crate::utils::error::Result;
