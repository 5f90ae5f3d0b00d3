//! End-to-end analysis runs: validation, projection and bridge.

pub mod demo;
pub mod error;
pub mod service;
pub mod types;


pub use demo::demo_dataset;
pub use error::AnalysisError;
pub use service::AnalysisService;
pub use types::{AnalysisParams, AnalysisReport, AnalysisRequest, AnalysisType, Frequency};
