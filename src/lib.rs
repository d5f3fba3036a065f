pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{http::HttpLaureateSource, storage::LocalStorage};
pub use config::AppConfig;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use self::core::{
    etl::{EtlEngine, RunSummary},
    pipeline::{LaureatePipeline, OutputSelection},
};
pub use utils::error::{EtlError, Result};
