pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod storage;

pub use config::Config;
pub use domain::{CompanyRecord, Industry, Region, SizeBucket, SourceRow};
pub use error::{ImporterError, Result};
